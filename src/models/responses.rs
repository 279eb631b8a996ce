use serde::{Deserialize, Serialize};
use crate::models::domain::{Comment, LeaderboardEntry, Post};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Leaderboard page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub domains: Vec<String>,
    #[serde(rename = "selectedDomain")]
    pub selected_domain: Option<String>,
}

/// Outcome of a scrape-and-import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResponse {
    #[serde(rename = "runId")]
    pub run_id: String,
    pub scraped: usize,
    pub imported: usize,
}

/// Generic success message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Like toggle result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub liked: bool,
    #[serde(rename = "likesCount")]
    pub likes_count: i32,
}

/// Post with its comments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub comments: Vec<Comment>,
}
