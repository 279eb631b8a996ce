// Route exports
pub mod community;
pub mod opportunities;
pub mod ranking;
pub mod students;

use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::sync::Arc;

use crate::config::RankingSettings;
use crate::core::Scorer;
use crate::models::{ErrorResponse, HealthResponse};
use crate::services::{CacheManager, OpportunityScraper, PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Option<Arc<CacheManager>>,
    pub scraper: Arc<OpportunityScraper>,
    pub scorer: Scorer,
    pub ranking: RankingSettings,
}

impl AppState {
    /// Drop cached rankings after any score change; failures are only logged
    pub async fn invalidate_rankings(&self) {
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.invalidate_rankings().await {
                tracing::warn!("Failed to invalidate ranking cache: {}", e);
            }
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(health_check))
            .configure(students::configure)
            .configure(ranking::configure)
            .configure(opportunities::configure)
            .configure(community::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Status code for a persistence error
pub(crate) fn status_for(err: &PostgresError) -> StatusCode {
    match err {
        PostgresError::NotFound(_) => StatusCode::NOT_FOUND,
        PostgresError::Conflict(_) => StatusCode::CONFLICT,
        PostgresError::Forbidden(_) => StatusCode::FORBIDDEN,
        PostgresError::SqlxError(_) | PostgresError::MigrateError(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// JSON error body for a persistence error
pub(crate) fn db_error(context: &str, err: PostgresError) -> HttpResponse {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!("{}: {}", context, err);
    } else {
        tracing::info!("{}: {}", context, err);
    }

    HttpResponse::build(status).json(ErrorResponse {
        error: context.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

/// JSON error body for a rejected request
pub(crate) fn bad_request(error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: 400,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&PostgresError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&PostgresError::Conflict("x".into())), StatusCode::CONFLICT);
        assert_eq!(status_for(&PostgresError::Forbidden("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(
            status_for(&PostgresError::SqlxError(sqlx::Error::RowNotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_status() {
        let response = bad_request("Validation failed", "title: length");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_db_error_status() {
        let response = db_error("Failed to fetch student", PostgresError::NotFound("Student 4".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
