// Integration tests for Ivy Intel

use ivy_intel::core::{prepare_import, NO_DESCRIPTION};
use ivy_intel::models::{Category, Domain, Source};
use ivy_intel::services::scraper::DEFAULT_USER_AGENT;
use ivy_intel::services::OpportunityScraper;
use std::collections::HashSet;
use std::time::Duration;
use tokio::net::TcpListener;

const HARVARD_PAGE: &str = r#"
    <html><body>
      <div class="event">
        <h3>Deep Learning Workshop</h3>
        <p class="description">Hands-on neural network training.</p>
        <a href="https://www.harvard.edu/events/dl">More</a>
      </div>
      <div class="event">
        <h3>Law and Justice Symposium</h3>
      </div>
    </body></html>
"#;

const BROWN_PAGE: &str = r#"
    <html><body>
      <article class="opportunity">
        <h2>Summer Research Scholarship</h2>
        <p class="summary">Funding for organic chemistry labs.</p>
      </article>
    </body></html>
"#;

/// A listener that accepts connections and never answers
async fn hanging_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        loop {
            match listener.accept().await {
                Ok((socket, _)) => held.push(socket),
                Err(_) => break,
            }
        }
    });

    format!("http://{}", addr)
}

fn scraper(sources: Vec<Source>) -> OpportunityScraper {
    OpportunityScraper::new(sources, Duration::from_millis(500), DEFAULT_USER_AGENT, 10).unwrap()
}

#[tokio::test]
async fn test_timed_out_source_does_not_abort_batch() {
    let mut server = mockito::Server::new_async().await;

    let harvard = server
        .mock("GET", "/harvard/events")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(HARVARD_PAGE)
        .create_async()
        .await;
    let brown = server
        .mock("GET", "/brown/events")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(BROWN_PAGE)
        .create_async()
        .await;

    let slow = hanging_server().await;

    let sources = vec![
        Source::new("Harvard", format!("{}/harvard/events", server.url())),
        Source::new("Yale", format!("{}/yale/events", slow)),
        Source::new("Brown", format!("{}/brown/events", server.url())),
    ];
    let records = scraper(sources).scrape_all().await;

    harvard.assert_async().await;
    brown.assert_async().await;

    let universities: Vec<&str> = records.iter().map(|r| r.university.as_str()).collect();
    assert_eq!(universities, vec!["Harvard", "Harvard", "Brown"]);

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Deep Learning Workshop", "Law and Justice Symposium", "Summer Research Scholarship"]
    );
}

#[tokio::test]
async fn test_error_status_source_yields_nothing() {
    let mut server = mockito::Server::new_async().await;

    let _ok = server
        .mock("GET", "/ok")
        .with_status(200)
        .with_body(BROWN_PAGE)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", "/broken")
        .with_status(500)
        .with_body(HARVARD_PAGE)
        .create_async()
        .await;

    let sources = vec![
        Source::new("Broken", format!("{}/broken", server.url())),
        Source::new("Brown", format!("{}/ok", server.url())),
    ];
    let records = scraper(sources).scrape_all().await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].university, "Brown");
}

#[tokio::test]
async fn test_extracted_fields_and_defaults() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/events")
        .with_status(200)
        .with_body(HARVARD_PAGE)
        .create_async()
        .await;

    let page_url = format!("{}/events", server.url());
    let records = scraper(vec![Source::new("Harvard", page_url.clone())]).scrape_all().await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].description, "Hands-on neural network training.");
    assert_eq!(records[0].url, "https://www.harvard.edu/events/dl");
    assert_eq!(records[1].description, NO_DESCRIPTION);
    assert_eq!(records[1].url, page_url);
}

#[tokio::test]
async fn test_scrape_dedupe_classify_pipeline() {
    let mut server = mockito::Server::new_async().await;
    let _harvard = server
        .mock("GET", "/harvard")
        .with_status(200)
        .with_body(HARVARD_PAGE)
        .create_async()
        .await;
    let _brown = server
        .mock("GET", "/brown")
        .with_status(200)
        .with_body(BROWN_PAGE)
        .create_async()
        .await;

    let sources = vec![
        Source::new("Harvard", format!("{}/harvard", server.url())),
        Source::new("Brown", format!("{}/brown", server.url())),
    ];
    let scraped = scraper(sources).scrape_all().await;

    let existing: HashSet<String> = ["Law and Justice Symposium".to_string()].into_iter().collect();
    let batch = prepare_import(&existing, scraped);

    assert_eq!(batch.len(), 2);

    assert_eq!(batch[0].title, "Deep Learning Workshop");
    assert_eq!(batch[0].domain.as_deref(), Some(Domain::ArtificialIntelligence.as_str()));
    assert_eq!(batch[0].category.as_deref(), Some(Category::Workshop.as_str()));

    assert_eq!(batch[1].title, "Summer Research Scholarship");
    assert_eq!(batch[1].domain.as_deref(), Some(Domain::Chemistry.as_str()));
    assert_eq!(batch[1].category.as_deref(), Some(Category::Research.as_str()));
    assert_eq!(batch[1].university.as_deref(), Some("Brown"));
}
