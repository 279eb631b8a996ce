use crate::core::extraction::{ExtractError, ListingExtractor};
use crate::models::{ScrapedRecord, Source};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur while scraping one source
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Source returned status {0}")]
    Status(StatusCode),

    #[error("Extractor setup failed: {0}")]
    Extract(#[from] ExtractError),
}

/// The institution pages scraped when nothing else is configured
pub fn default_sources() -> Vec<Source> {
    [
        ("Harvard", "https://www.harvard.edu/events"),
        ("MIT", "https://www.mit.edu/events"),
        ("Yale", "https://www.yale.edu/events"),
        ("Princeton", "https://www.princeton.edu/events"),
        ("Columbia", "https://www.columbia.edu/events"),
        ("Cornell", "https://www.cornell.edu/events"),
        ("UPenn", "https://www.upenn.edu/events"),
        ("Brown", "https://www.brown.edu/events"),
    ]
    .into_iter()
    .map(|(name, url)| Source::new(name, url))
    .collect()
}

/// Scraper for institution event pages
///
/// Sources are visited one at a time, in configuration order. A source that
/// fails (transport error, timeout, non-2xx status) is logged and contributes
/// nothing; it never aborts the rest of the batch.
pub struct OpportunityScraper {
    client: Client,
    sources: Vec<Source>,
    extractor: ListingExtractor,
}

impl OpportunityScraper {
    /// Create a new scraper
    pub fn new(
        sources: Vec<Source>,
        timeout: Duration,
        user_agent: &str,
        per_source_limit: usize,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            sources,
            extractor: ListingExtractor::new(per_source_limit)?,
        })
    }

    /// Scraper over the default sources with default timeout and user agent
    pub fn with_defaults() -> Result<Self, ScrapeError> {
        Self::new(
            default_sources(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            DEFAULT_USER_AGENT,
            crate::core::MAX_RECORDS_PER_SOURCE,
        )
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Fetch and extract one source, surfacing any failure
    pub async fn scrape_source(&self, source: &Source) -> Result<Vec<ScrapedRecord>, ScrapeError> {
        tracing::debug!("Fetching {} from {}", source.name, source.url);

        let response = self.client.get(&source.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status));
        }

        let body = response.text().await?;

        Ok(self.extractor.extract(&body, &source.name, &source.url))
    }

    /// Scrape one source, logging and swallowing failures
    pub async fn scrape_university(&self, source: &Source) -> Vec<ScrapedRecord> {
        match self.scrape_source(source).await {
            Ok(records) => {
                tracing::info!("Scraped {} opportunities from {}", records.len(), source.name);
                records
            }
            Err(e) => {
                tracing::error!("Error scraping {}: {}", source.name, e);
                Vec::new()
            }
        }
    }

    /// Scrape the given sources in order and concatenate their records
    pub async fn fetch_candidates(&self, sources: &[Source]) -> Vec<ScrapedRecord> {
        let mut all = Vec::new();

        for source in sources {
            let records = self.scrape_university(source).await;
            all.extend(records);
        }

        tracing::info!("Total opportunities scraped: {}", all.len());
        all
    }

    /// Scrape every configured source
    pub async fn scrape_all(&self) -> Vec<ScrapedRecord> {
        self.fetch_candidates(&self.sources).await
    }
}
