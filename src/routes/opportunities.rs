use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use super::{bad_request, db_error, AppState};
use crate::core::{classify, classify_category, classify_domain, prepare_import};
use crate::models::requests::{parse_deadline, trimmed};
use crate::models::{
    ActorQuery, ApplyRequest, ClassifyRequest, CreateOpportunityRequest, DomainFilter,
    MessageResponse, NewOpportunity, ScrapeResponse, UpdateOpportunityRequest,
};

/// University recorded on opportunities posted by students
pub const USER_GENERATED: &str = "User Generated";

/// Configure opportunity routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/opportunities", web::get().to(list_opportunities))
        .route("/opportunities", web::post().to(create_opportunity))
        .route("/opportunities/scrape", web::post().to(scrape_opportunities))
        .route("/opportunities/classify", web::post().to(classify_text))
        .route("/opportunities/{id}", web::get().to(get_opportunity))
        .route("/opportunities/{id}", web::put().to(update_opportunity))
        .route("/opportunities/{id}", web::delete().to(delete_opportunity))
        .route("/opportunities/{id}/toggle-status", web::post().to(toggle_status))
        .route("/opportunities/{id}/apply", web::post().to(apply));
}

/// Active opportunities, newest first
///
/// GET /api/v1/opportunities?domain={domain}
async fn list_opportunities(
    state: web::Data<AppState>,
    query: web::Query<DomainFilter>,
) -> impl Responder {
    let domain = query.domain.as_deref().filter(|d| !d.is_empty());

    match state.postgres.list_active_opportunities(domain).await {
        Ok(opportunities) => HttpResponse::Ok().json(opportunities),
        Err(e) => db_error("Failed to list opportunities", e),
    }
}

/// Turn a student's submission into a storable opportunity
///
/// Missing domain or category is filled in by the classifier.
fn new_from_request(req: &CreateOpportunityRequest) -> Result<NewOpportunity, chrono::ParseError> {
    let title = req.title.trim().to_string();
    let description = req.description.trim().to_string();

    let domain = trimmed(&req.domain)
        .unwrap_or_else(|| classify_domain(&title, &description).to_string());
    let category = trimmed(&req.category)
        .unwrap_or_else(|| classify_category(&title, &description).to_string());

    Ok(NewOpportunity {
        university: Some(trimmed(&req.university).unwrap_or_else(|| USER_GENERATED.to_string())),
        domain: Some(domain),
        category: Some(category),
        deadline: parse_deadline(req.deadline.as_deref())?,
        url: trimmed(&req.url),
        requirements: trimmed(&req.requirements),
        location: trimmed(&req.location),
        created_by: req.user_id,
        title,
        description,
    })
}

/// Post a new opportunity
///
/// POST /api/v1/opportunities
async fn create_opportunity(
    state: web::Data<AppState>,
    req: web::Json<CreateOpportunityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors);
    }

    let opp = match new_from_request(&req) {
        Ok(opp) => opp,
        Err(e) => return bad_request("Invalid deadline", format!("Expected YYYY-MM-DD: {}", e)),
    };

    match state.postgres.create_opportunity(&opp).await {
        Ok(created) => {
            tracing::info!("Opportunity {} posted by {:?}", created.id, created.created_by);
            HttpResponse::Created().json(created)
        }
        Err(e) => db_error("Failed to create opportunity", e),
    }
}

/// Scrape every configured source and import the new records
///
/// POST /api/v1/opportunities/scrape
async fn scrape_opportunities(state: web::Data<AppState>) -> impl Responder {
    let run_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Scrape run {} started", run_id);

    let scraped = state.scraper.scrape_all().await;
    let scraped_count = scraped.len();

    let existing = match state.postgres.existing_titles().await {
        Ok(titles) => titles,
        Err(e) => return db_error("Failed to load existing opportunities", e),
    };

    let batch = prepare_import(&existing, scraped);

    match state.postgres.import_opportunities(&batch).await {
        Ok(imported) => {
            tracing::info!(
                "Scrape run {} finished: {} scraped, {} imported",
                run_id,
                scraped_count,
                imported
            );
            HttpResponse::Ok().json(ScrapeResponse {
                run_id,
                scraped: scraped_count,
                imported,
            })
        }
        Err(e) => db_error("Failed to import opportunities", e),
    }
}

/// Classify free text without storing anything
///
/// POST /api/v1/opportunities/classify
async fn classify_text(req: web::Json<ClassifyRequest>) -> impl Responder {
    HttpResponse::Ok().json(classify(&req.title, &req.description))
}

async fn get_opportunity(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.postgres.get_opportunity(path.into_inner()).await {
        Ok(opportunity) => HttpResponse::Ok().json(opportunity),
        Err(e) => db_error("Failed to fetch opportunity", e),
    }
}

async fn update_opportunity(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<UpdateOpportunityRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors);
    }

    let opp = match req.to_new_opportunity() {
        Ok(opp) => opp,
        Err(e) => return bad_request("Invalid deadline", format!("Expected YYYY-MM-DD: {}", e)),
    };

    match state
        .postgres
        .update_opportunity(path.into_inner(), req.user_id, &opp)
        .await
    {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => db_error("Failed to update opportunity", e),
    }
}

/// DELETE /api/v1/opportunities/{id}?userId={id}
async fn delete_opportunity(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<ActorQuery>,
) -> impl Responder {
    match state
        .postgres
        .delete_opportunity(path.into_inner(), query.user_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            success: true,
            message: "Opportunity deleted".to_string(),
        }),
        Err(e) => db_error("Failed to delete opportunity", e),
    }
}

/// POST /api/v1/opportunities/{id}/toggle-status?userId={id}
async fn toggle_status(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<ActorQuery>,
) -> impl Responder {
    match state
        .postgres
        .toggle_opportunity_status(path.into_inner(), query.user_id)
        .await
    {
        Ok(opportunity) => HttpResponse::Ok().json(opportunity),
        Err(e) => db_error("Failed to toggle opportunity", e),
    }
}

/// POST /api/v1/opportunities/{id}/apply
async fn apply(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<ApplyRequest>,
) -> impl Responder {
    match state.postgres.apply(req.user_id, path.into_inner()).await {
        Ok(application) => HttpResponse::Created().json(application),
        Err(e) => db_error("Failed to apply", e),
    }
}
