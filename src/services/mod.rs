// Service exports
pub mod cache;
pub mod postgres;
pub mod scraper;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use postgres::{PostgresClient, PostgresError};
pub use self::scraper::{default_sources, OpportunityScraper, ScrapeError};
