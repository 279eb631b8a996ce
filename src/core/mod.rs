// Core algorithm exports
pub mod classifier;
pub mod extraction;
pub mod leaderboard;
pub mod scoring;

pub use classifier::{classify, classify_category, classify_domain};
pub use extraction::{
    dedupe, dedupe_batch, prepare_import, storable, ExtractError, ListingExtractor,
    MAX_RECORDS_PER_SOURCE, MAX_TITLE_CHARS, MAX_UNIVERSITY_CHARS, MAX_URL_CHARS, NO_DESCRIPTION,
};
pub use leaderboard::{rank_students, recommend_students, RankResult};
pub use scoring::{compute_score, Scorer};
