use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use super::{bad_request, db_error, AppState};
use crate::models::{AchievementProfile, CreateStudentRequest, Student, UpdateProfileRequest};

/// Configure student profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/students", web::post().to(create_student))
        .route("/students/{id}", web::get().to(get_student))
        .route("/students/{id}", web::put().to(update_profile))
        .route("/students/{id}/achievements", web::put().to(update_profile))
        .route("/students/{id}/dashboard", web::get().to(dashboard))
        .route("/students/{id}/applications", web::get().to(applications))
        .route("/students/{id}/opportunities", web::get().to(created_opportunities));
}

/// Register a student
///
/// POST /api/v1/students
async fn create_student(
    state: web::Data<AppState>,
    req: web::Json<CreateStudentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors);
    }

    match state.postgres.create_student(&req).await {
        Ok(student) => {
            tracing::info!("Registered student {} ({})", student.id, student.username);
            with_rankings_invalidated(&state, StatusCode::CREATED, student).await
        }
        Err(e) => db_error("Failed to register student", e),
    }
}

async fn get_student(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.postgres.get_student(path.into_inner()).await {
        Ok(student) => HttpResponse::Ok().json(student),
        Err(e) => db_error("Failed to fetch student", e),
    }
}

/// Respond with a student whose score or domain may have changed the rankings
async fn with_rankings_invalidated(
    state: &AppState,
    status: StatusCode,
    student: Student,
) -> HttpResponse {
    state.invalidate_rankings().await;
    HttpResponse::build(status).json(student)
}

/// Update profile fields and achievement counters; the InCoScore is
/// recomputed in the same write
///
/// PUT /api/v1/students/{id}
/// PUT /api/v1/students/{id}/achievements
///
/// Request body (profile fields are optional and kept when omitted):
/// ```json
/// {
///   "fullName": "Ada Lovelace",
///   "domain": "Mathematics",
///   "hackathons": 2,
///   "internships": 1,
///   "researchPapers": 0,
///   "codingScore": 80.0,
///   "competitionWins": 1
/// }
/// ```
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors);
    }

    let id = path.into_inner();
    let changes = req.profile_changes();
    let profile = AchievementProfile::from(&*req);

    match state
        .postgres
        .update_profile(id, &changes, &profile, &state.scorer)
        .await
    {
        Ok(student) => {
            tracing::info!("Updated profile for student {} (InCoScore {})", id, student.incoscore);
            with_rankings_invalidated(&state, StatusCode::OK, student).await
        }
        Err(e) => db_error("Failed to update profile", e),
    }
}

/// Domain filter for a student's dashboard; `None` lists every active opportunity
fn dashboard_domain(student: &Student) -> Option<&str> {
    student.domain.as_deref().map(str::trim).filter(|d| !d.is_empty())
}

/// Active opportunities in the student's own domain
///
/// A student without a domain sees every active opportunity.
async fn dashboard(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let student = match state.postgres.get_student(path.into_inner()).await {
        Ok(student) => student,
        Err(e) => return db_error("Failed to fetch student", e),
    };

    match state
        .postgres
        .list_active_opportunities(dashboard_domain(&student))
        .await
    {
        Ok(opportunities) => HttpResponse::Ok().json(opportunities),
        Err(e) => db_error("Failed to list opportunities", e),
    }
}

async fn applications(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.postgres.list_applications(path.into_inner()).await {
        Ok(applications) => HttpResponse::Ok().json(applications),
        Err(e) => db_error("Failed to list applications", e),
    }
}

async fn created_opportunities(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    match state.postgres.list_created_by(path.into_inner()).await {
        Ok(opportunities) => HttpResponse::Ok().json(opportunities),
        Err(e) => db_error("Failed to list opportunities", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RankingSettings;
    use crate::core::Scorer;
    use crate::services::{CacheKey, CacheManager, OpportunityScraper, PostgresClient};
    use std::sync::Arc;

    fn student(domain: Option<&str>) -> Student {
        let now = chrono::Utc::now();
        Student {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.edu".to_string(),
            full_name: None,
            domain: domain.map(str::to_string),
            skills: None,
            interests: None,
            academic_background: None,
            achievements: AchievementProfile::default(),
            incoscore: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    fn state(cache: Option<Arc<CacheManager>>) -> AppState {
        AppState {
            postgres: Arc::new(
                PostgresClient::connect_lazy("postgres://localhost/ivy_intel").unwrap(),
            ),
            cache,
            scraper: Arc::new(OpportunityScraper::with_defaults().unwrap()),
            scorer: Scorer::default(),
            ranking: RankingSettings::default(),
        }
    }

    #[test]
    fn test_dashboard_domain() {
        assert_eq!(dashboard_domain(&student(Some("Law"))), Some("Law"));
        assert_eq!(dashboard_domain(&student(None)), None);
        assert_eq!(dashboard_domain(&student(Some("  "))), None);
    }

    #[tokio::test]
    async fn test_registration_response_without_cache() {
        let response =
            with_rankings_invalidated(&state(None), StatusCode::CREATED, student(None)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_registration_clears_cached_leaderboard() {
        let cache = CacheManager::new("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");
        let cache = Arc::new(cache);

        let key = CacheKey::leaderboard(None, 50);
        cache.set(&key, &vec![1, 2, 3]).await.unwrap();

        let state = state(Some(cache.clone()));
        let response = with_rankings_invalidated(&state, StatusCode::CREATED, student(None)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(cache.get::<Vec<i32>>(&key).await.is_err());
    }
}
