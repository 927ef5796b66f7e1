use link_tracker::config::Config;
use link_tracker::registry::PageRegistry;
use link_tracker::tracker::track;
use link_tracker::{load_pages, LoadError, Tracker};
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Starts a server with two pages with links and one failing page
async fn start_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<ul>\n<li><a href=\"/a1\">A1</a></li>\n<li><a href=\"/a2\">A2</a></li>\n</ul>\n",
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p><a href=\"/b1\">B1</a></p>\n", "text/html"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    server
}

fn page_list(base_url: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create page list");
    writeln!(file, "Site A ; {}/a", base_url).unwrap();
    writeln!(file, "bad-line-no-semicolon").unwrap();
    writeln!(file, "Broken;{}/broken", base_url).unwrap();
    writeln!(file, "Site B;{}/b", base_url).unwrap();
    file.flush().unwrap();
    file
}

fn config_with_concurrency(max_concurrent_fetches: usize) -> Config {
    let mut config = Config::default();
    config.tracker.max_concurrent_fetches = max_concurrent_fetches;
    config
}

async fn assert_batch(max_concurrent_fetches: usize) {
    let server = start_site().await;
    let pages = page_list(&server.uri());
    let config = config_with_concurrency(max_concurrent_fetches);

    let mut registry = PageRegistry::new();
    let summary = track(&config, pages.path(), &mut registry)
        .await
        .expect("Batch failed");

    let names: Vec<&str> = registry.iter().map(|page| page.name()).collect();
    assert_eq!(names, vec!["Site A", "Broken", "Site B"]);

    assert_eq!(
        registry.get(0).unwrap().links(),
        [
            "<a href=\"/a1\">A1</a>".to_string(),
            "<a href=\"/a2\">A2</a>".to_string()
        ]
    );
    assert!(registry.get(1).unwrap().links().is_empty());
    assert_eq!(
        registry.get(2).unwrap().links(),
        ["<a href=\"/b1\">B1</a>".to_string()]
    );

    assert_eq!(summary.total_pages, 3);
    assert_eq!(summary.processed_pages, 3);
    assert_eq!(summary.total_links, 3);
    assert_eq!(summary.failed_pages(), 1);
    assert_eq!(summary.failures[0].name, "Broken");
    assert!(summary.failures[0].message.contains("HTTP status 500"));
}

#[tokio::test]
async fn test_batch_sequential() {
    assert_batch(1).await;
}

#[tokio::test]
async fn test_batch_concurrent() {
    assert_batch(3).await;
}

#[tokio::test]
async fn test_reprocessing_replaces_links() {
    let server = start_site().await;
    let pages = page_list(&server.uri());
    let tracker = Tracker::new(&Config::default()).unwrap();

    let mut registry = PageRegistry::new();
    registry.load(pages.path()).unwrap();

    let first = tracker.process(&mut registry).await;
    let second = tracker.process(&mut registry).await;

    assert_eq!(first, second);
    assert_eq!(registry.total_links(), 3);
}

#[tokio::test]
async fn test_missing_page_list_is_reported() {
    let mut registry = PageRegistry::new();
    let result = track(
        &Config::default(),
        std::path::Path::new("/nonexistent/pages.txt"),
        &mut registry,
    )
    .await;

    assert!(result.is_err());
    assert!(matches!(
        load_pages(std::path::Path::new("/nonexistent/pages.txt")),
        Err(LoadError::SourceUnreadable { .. })
    ));
}
