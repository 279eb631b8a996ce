use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use super::{bad_request, db_error, AppState};
use crate::models::requests::trimmed;
use crate::models::{
    CreateCommentRequest, CreatePostRequest, DomainFilter, LikeRequest, LikeResponse,
    PostDetailResponse,
};

/// Configure community feed routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/community/posts", web::get().to(list_posts))
        .route("/community/posts", web::post().to(create_post))
        .route("/community/posts/{id}", web::get().to(get_post))
        .route("/community/posts/{id}/comments", web::post().to(add_comment))
        .route("/community/posts/{id}/like", web::post().to(toggle_like))
        .route("/community/groups", web::get().to(list_groups));
}

async fn list_posts(state: web::Data<AppState>, query: web::Query<DomainFilter>) -> impl Responder {
    let domain = query.domain.as_deref().filter(|d| !d.is_empty());

    match state.postgres.list_posts(domain).await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(e) => db_error("Failed to list posts", e),
    }
}

async fn create_post(
    state: web::Data<AppState>,
    req: web::Json<CreatePostRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors);
    }

    let domain = trimmed(&req.domain);
    match state
        .postgres
        .create_post(req.user_id, req.title.trim(), req.content.trim(), domain.as_deref())
        .await
    {
        Ok(post) => HttpResponse::Created().json(post),
        Err(e) => db_error("Failed to create post", e),
    }
}

/// A post with its comments, oldest comment first
async fn get_post(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    let post = match state.postgres.get_post(id).await {
        Ok(post) => post,
        Err(e) => return db_error("Failed to fetch post", e),
    };

    match state.postgres.list_comments(id).await {
        Ok(comments) => HttpResponse::Ok().json(PostDetailResponse { post, comments }),
        Err(e) => db_error("Failed to list comments", e),
    }
}

async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<CreateCommentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors);
    }

    match state
        .postgres
        .add_comment(path.into_inner(), req.user_id, req.content.trim())
        .await
    {
        Ok(comment) => HttpResponse::Created().json(comment),
        Err(e) => db_error("Failed to add comment", e),
    }
}

/// Like a post, or unlike it if already liked
async fn toggle_like(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<LikeRequest>,
) -> impl Responder {
    match state.postgres.toggle_like(path.into_inner(), req.user_id).await {
        Ok((liked, likes_count)) => HttpResponse::Ok().json(LikeResponse { liked, likes_count }),
        Err(e) => db_error("Failed to toggle like", e),
    }
}

async fn list_groups(state: web::Data<AppState>) -> impl Responder {
    match state.postgres.list_groups().await {
        Ok(groups) => HttpResponse::Ok().json(groups),
        Err(e) => db_error("Failed to list groups", e),
    }
}
