//! Ivy Intel - opportunity aggregation and student ranking service
//!
//! This library scrapes institution event pages into opportunity records,
//! classifies them by subject domain and category, and ranks students by
//! their InCoScore, a weighted sum of achievement counters.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{classify, compute_score, dedupe, rank_students, ListingExtractor, Scorer};
pub use models::{
    AchievementProfile, Category, ClassificationResult, Domain, LeaderboardEntry, ScoreWeights,
    ScrapedRecord, Source, Student,
};
pub use services::OpportunityScraper;
