use crate::core::classifier::classify;
use crate::models::{NewOpportunity, ScrapedRecord};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use thiserror::Error;

/// Cap on listing elements taken from one page
pub const MAX_RECORDS_PER_SOURCE: usize = 10;

/// Description used when a listing has no summary element
pub const NO_DESCRIPTION: &str = "No description";

/// Longest title, url and university that fit the opportunity columns
pub const MAX_TITLE_CHARS: usize = 255;
pub const MAX_URL_CHARS: usize = 500;
pub const MAX_UNIVERSITY_CHARS: usize = 100;

const LISTING_SELECTOR: &str =
    "div.event, div.opportunity, div.item, article.event, article.opportunity, article.item";
const HEADING_SELECTOR: &str = "h2, h3, h4";
const SUMMARY_SELECTOR: &str = "p.description, p.summary, div.description, div.summary";
const LINK_SELECTOR: &str = "a";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector `{selector}`: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },
}

fn selector(css: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css,
        message: format!("{:?}", e),
    })
}

/// Heuristic extractor for listing-like markup
///
/// Picks `div`/`article` elements classed `event`, `opportunity` or `item`
/// and reads a heading, a summary and the first link out of each. This is a
/// best-effort shape match, not a site-specific parser.
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    listing: Selector,
    heading: Selector,
    summary: Selector,
    link: Selector,
    limit: usize,
}

impl ListingExtractor {
    pub fn new(limit: usize) -> Result<Self, ExtractError> {
        Ok(Self {
            listing: selector(LISTING_SELECTOR)?,
            heading: selector(HEADING_SELECTOR)?,
            summary: selector(SUMMARY_SELECTOR)?,
            link: selector(LINK_SELECTOR)?,
            limit,
        })
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Extract candidate records from a page
    ///
    /// At most `limit` listing elements are considered, in document order.
    /// Elements without a non-blank heading are skipped.
    pub fn extract(&self, html: &str, university: &str, page_url: &str) -> Vec<ScrapedRecord> {
        let document = Html::parse_document(html);
        let extracted_at = chrono::Utc::now();

        document
            .select(&self.listing)
            .take(self.limit)
            .filter_map(|element| {
                let title = element
                    .select(&self.heading)
                    .next()
                    .map(|h| element_text(&h))
                    .filter(|t| !t.is_empty())?;

                let description = element
                    .select(&self.summary)
                    .next()
                    .map(|d| element_text(&d))
                    .unwrap_or_else(|| NO_DESCRIPTION.to_string());

                let url = element
                    .select(&self.link)
                    .next()
                    .and_then(|a| a.value().attr("href"))
                    .map(str::trim)
                    .filter(|href| !href.is_empty())
                    .unwrap_or(page_url)
                    .to_string();

                Some(ScrapedRecord {
                    title,
                    description,
                    university: university.to_string(),
                    url,
                    extracted_at,
                })
            })
            .collect()
    }
}

/// All text nodes under an element, each trimmed, joined without a separator
///
/// `<h3>Quantum <b>AI</b> Day</h3>` reads as `QuantumAIDay`; whitespace
/// inside a single text node is kept. Stored titles are compared byte for
/// byte, so this must stay stable across releases.
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Drop candidates whose title already exists
///
/// Exact, case-sensitive title comparison.
pub fn dedupe(existing: &HashSet<String>, candidates: Vec<ScrapedRecord>) -> Vec<ScrapedRecord> {
    let fresh: Vec<ScrapedRecord> = candidates
        .into_iter()
        .filter(|c| !existing.contains(&c.title))
        .collect();

    tracing::info!("Found {} new opportunities", fresh.len());
    fresh
}

/// Like [`dedupe`], but a title repeated within the batch is kept only once
pub fn dedupe_batch(existing: &HashSet<String>, candidates: Vec<ScrapedRecord>) -> Vec<ScrapedRecord> {
    let mut seen: HashSet<String> = HashSet::new();
    let fresh: Vec<ScrapedRecord> = dedupe(existing, candidates)
        .into_iter()
        .filter(|c| seen.insert(c.title.clone()))
        .collect();

    fresh
}

/// Drop records whose title, url or university would overflow its column
pub fn storable(candidates: Vec<ScrapedRecord>) -> Vec<ScrapedRecord> {
    candidates
        .into_iter()
        .filter(|c| {
            let title_len = c.title.chars().count();
            let url_len = c.url.chars().count();
            let fits = title_len <= MAX_TITLE_CHARS
                && url_len <= MAX_URL_CHARS
                && c.university.chars().count() <= MAX_UNIVERSITY_CHARS;

            if !fits {
                tracing::warn!(
                    "Skipping oversize record from {} (title {} chars, url {} chars)",
                    c.university,
                    title_len,
                    url_len
                );
            }
            fits
        })
        .collect()
}

/// Turn one scrape run into rows for a single import transaction
///
/// Oversize records go first, then stored and repeated titles; every
/// survivor is classified.
pub fn prepare_import(existing: &HashSet<String>, scraped: Vec<ScrapedRecord>) -> Vec<NewOpportunity> {
    dedupe_batch(existing, storable(scraped))
        .iter()
        .map(|record| NewOpportunity::from_scraped(record, classify(&record.title, &record.description)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="event featured">
            <h3>  Quantum   Computing Seminar </h3>
            <p class="summary">An afternoon of qubits.</p>
            <a href="/events/quantum">Details</a>
          </div>
          <article class="item">
            <h2>Law Review Hackathon</h2>
          </article>
          <div class="item"><p>No heading here</p></div>
          <div class="sidebar"><h3>Not a listing</h3></div>
        </body></html>
    "#;

    fn record(title: &str) -> ScrapedRecord {
        ScrapedRecord {
            title: title.to_string(),
            description: NO_DESCRIPTION.to_string(),
            university: "MIT".to_string(),
            url: "https://www.mit.edu/events".to_string(),
            extracted_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_extracts_listing_elements() {
        let extractor = ListingExtractor::new(MAX_RECORDS_PER_SOURCE).unwrap();
        let records = extractor.extract(PAGE, "MIT", "https://www.mit.edu/events");

        assert_eq!(records.len(), 2);

        assert_eq!(records[0].title, "Quantum   Computing Seminar");
        assert_eq!(records[0].description, "An afternoon of qubits.");
        assert_eq!(records[0].url, "/events/quantum");
        assert_eq!(records[0].university, "MIT");

        assert_eq!(records[1].title, "Law Review Hackathon");
        assert_eq!(records[1].description, NO_DESCRIPTION);
        assert_eq!(records[1].url, "https://www.mit.edu/events");
    }

    #[test]
    fn test_nested_text_nodes_join_without_separator() {
        let html = r#"
            <div class="event">
              <h3>Quantum <b>AI</b>   Day</h3>
              <p class="summary"> Talks <em>and</em> demos </p>
            </div>
        "#;
        let extractor = ListingExtractor::new(MAX_RECORDS_PER_SOURCE).unwrap();
        let records = extractor.extract(html, "MIT", "https://www.mit.edu/events");

        assert_eq!(records[0].title, "QuantumAIDay");
        assert_eq!(records[0].description, "Talksanddemos");
    }

    #[test]
    fn test_limit_applies_before_heading_check() {
        let mut html = String::from("<div class=\"event\"><p>untitled</p></div>");
        for i in 0..15 {
            html.push_str(&format!("<div class=\"event\"><h4>Event {}</h4></div>", i));
        }

        let extractor = ListingExtractor::new(MAX_RECORDS_PER_SOURCE).unwrap();
        let records = extractor.extract(&html, "Yale", "https://www.yale.edu/events");

        assert_eq!(records.len(), 9);
        assert_eq!(records[0].title, "Event 0");
        assert_eq!(records[8].title, "Event 8");
    }

    #[test]
    fn test_blank_heading_skipped() {
        let html = r#"<div class="opportunity"><h2>   </h2></div>"#;
        let extractor = ListingExtractor::new(MAX_RECORDS_PER_SOURCE).unwrap();
        assert!(extractor.extract(html, "Brown", "https://www.brown.edu/events").is_empty());
    }

    #[test]
    fn test_anchor_without_href_falls_back_to_page() {
        let html = r#"<div class="event"><h2>Open Lab</h2><a name="x">anchor</a></div>"#;
        let extractor = ListingExtractor::new(MAX_RECORDS_PER_SOURCE).unwrap();
        let records = extractor.extract(html, "Cornell", "https://www.cornell.edu/events");
        assert_eq!(records[0].url, "https://www.cornell.edu/events");
    }

    #[test]
    fn test_garbage_markup_yields_nothing() {
        let extractor = ListingExtractor::new(MAX_RECORDS_PER_SOURCE).unwrap();
        assert!(extractor.extract("<<<not html", "Penn", "https://x").is_empty());
    }

    #[test]
    fn test_dedupe_exact_title_only() {
        let existing: HashSet<String> = ["Summer Program".to_string()].into_iter().collect();
        let candidates = vec![record("Summer Program"), record("summer program"), record("Winter School")];

        let fresh = dedupe(&existing, candidates);

        let titles: Vec<&str> = fresh.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["summer program", "Winter School"]);
    }

    #[test]
    fn test_dedupe_keeps_batch_repeats() {
        let existing = HashSet::new();
        let fresh = dedupe(&existing, vec![record("A"), record("A")]);
        assert_eq!(fresh.len(), 2);
    }

    #[test]
    fn test_dedupe_batch_drops_batch_repeats() {
        let existing: HashSet<String> = ["B".to_string()].into_iter().collect();
        let fresh = dedupe_batch(&existing, vec![record("A"), record("B"), record("A"), record("C")]);

        let titles: Vec<&str> = fresh.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_oversize_heading_is_not_imported() {
        let long_heading = "A".repeat(300);
        let html = format!(
            r#"<div class="event"><h3>{}</h3></div><div class="event"><h3>Short</h3></div>"#,
            long_heading
        );
        let extractor = ListingExtractor::new(MAX_RECORDS_PER_SOURCE).unwrap();
        let records = extractor.extract(&html, "MIT", "https://www.mit.edu/events");
        assert_eq!(records.len(), 2);

        let batch = prepare_import(&HashSet::new(), records);
        let titles: Vec<&str> = batch.iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["Short"]);
    }

    #[test]
    fn test_storable_checks_every_column() {
        let mut long_url = record("Open House");
        long_url.url = format!("https://www.mit.edu/{}", "x".repeat(MAX_URL_CHARS));

        let mut long_university = record("Career Fair");
        long_university.university = "U".repeat(MAX_UNIVERSITY_CHARS + 1);

        let exact = record(&"é".repeat(MAX_TITLE_CHARS));

        let kept = storable(vec![long_url, long_university, exact, record("Lab Tour")]);
        let titles: Vec<String> = kept.into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["é".repeat(MAX_TITLE_CHARS), "Lab Tour".to_string()]);
    }

    #[test]
    fn test_prepare_import_classifies_new_titles() {
        let existing: HashSet<String> = ["Law Day".to_string()].into_iter().collect();
        let batch = prepare_import(
            &existing,
            vec![record("Law Day"), record("Quantum physics hackathon"), record("Quantum physics hackathon")],
        );

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].domain.as_deref(), Some("Physics"));
        assert_eq!(batch[0].category.as_deref(), Some("Hackathon"));
        assert_eq!(batch[0].university.as_deref(), Some("MIT"));
    }
}
