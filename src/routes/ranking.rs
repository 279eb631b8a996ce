use actix_web::{web, HttpResponse, Responder};

use super::{db_error, AppState};
use crate::core::{rank_students, recommend_students};
use crate::models::{LeaderboardEntry, LeaderboardQuery, LeaderboardResponse, LimitQuery, MessageResponse};
use crate::services::CacheKey;

/// Configure ranking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/ranking/leaderboard", web::get().to(leaderboard))
        .route("/ranking/top-students/{domain}", web::get().to(top_students))
        .route("/ranking/recalculate", web::post().to(recalculate_all_scores));
}

/// Student leaderboard by InCoScore
///
/// GET /api/v1/ranking/leaderboard?domain={domain}&limit={limit}
async fn leaderboard(
    state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> impl Responder {
    let domain = query.domain.as_deref().filter(|d| !d.is_empty());
    let limit = query
        .limit
        .unwrap_or(state.ranking.default_limit)
        .min(state.ranking.max_limit);

    let cache_key = CacheKey::leaderboard(domain, limit);
    let cached = match &state.cache {
        Some(cache) => cache.get::<Vec<LeaderboardEntry>>(&cache_key).await.ok(),
        None => None,
    };

    let entries = match cached {
        Some(entries) => entries,
        None => {
            let students = match state.postgres.list_students(domain).await {
                Ok(students) => students,
                Err(e) => return db_error("Failed to load students", e),
            };

            let result = rank_students(students, domain, limit);
            tracing::debug!(
                "Ranked {} of {} students (domain: {:?})",
                result.entries.len(),
                result.total_candidates,
                domain
            );

            if let Some(cache) = &state.cache {
                if let Err(e) = cache.set(&cache_key, &result.entries).await {
                    tracing::warn!("Failed to cache leaderboard: {}", e);
                }
            }

            result.entries
        }
    };

    let domains = match state.postgres.distinct_domains().await {
        Ok(domains) => domains,
        Err(e) => {
            tracing::warn!("Failed to load student domains: {}", e);
            vec![]
        }
    };

    HttpResponse::Ok().json(LeaderboardResponse {
        leaderboard: entries,
        domains,
        selected_domain: domain.map(str::to_string),
    })
}

/// Top students for a domain, for matching to opportunities
///
/// GET /api/v1/ranking/top-students/{domain}?limit={limit}
async fn top_students(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<LimitQuery>,
) -> impl Responder {
    let domain = path.into_inner();
    let limit = query
        .limit
        .unwrap_or(state.ranking.recommend_limit)
        .min(state.ranking.max_limit);

    let cache_key = CacheKey::recommendations(&domain, limit);
    if let Some(cache) = &state.cache {
        if let Ok(picked) = cache.get::<Vec<serde_json::Value>>(&cache_key).await {
            return HttpResponse::Ok().json(picked);
        }
    }

    let students = match state.postgres.list_students(Some(&domain)).await {
        Ok(students) => students,
        Err(e) => return db_error("Failed to load students", e),
    };

    let picked: Vec<serde_json::Value> = recommend_students(students, &domain, limit)
        .into_iter()
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "name": s.display_name(),
                "username": s.username,
                "incoscore": s.incoscore,
                "domain": s.domain,
            })
        })
        .collect();

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&cache_key, &picked).await {
            tracing::warn!("Failed to cache recommendations: {}", e);
        }
    }

    HttpResponse::Ok().json(picked)
}

/// Recompute every student's InCoScore
///
/// POST /api/v1/ranking/recalculate
async fn recalculate_all_scores(state: web::Data<AppState>) -> impl Responder {
    match state.postgres.recalculate_all_scores(&state.scorer).await {
        Ok(count) => {
            state.invalidate_rankings().await;
            HttpResponse::Ok().json(MessageResponse {
                success: true,
                message: format!("Recalculated scores for {} users", count),
            })
        }
        Err(e) => db_error("Failed to recalculate scores", e),
    }
}
