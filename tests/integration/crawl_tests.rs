//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test the HTTP
//! fetcher and the full crawl cycle end-to-end.

use breadth_crawl::config::CrawlConfig;
use breadth_crawl::crawler::{Crawler, FetchOutcome, Fetcher, HttpFetcher};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html",
    )
}

fn test_config(start_url: &str, max_depth: u32) -> CrawlConfig {
    CrawlConfig::new(start_url)
        .with_max_depth(max_depth)
        .with_threads(4)
        .with_fetch_timeout(Duration::from_secs(2))
}

#[tokio::test]
async fn test_fetcher_extracts_absolute_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(&format!(
            r#"<a href="/page1">1</a>
               <a href="page2">2</a>
               <a href="{}/page3">3</a>
               <a href="mailto:someone@example.com">mail</a>
               <a href="https://other.example/">other</a>"#,
            base_url
        )))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_config(&base_url, 1)).unwrap();
    let links = match fetcher.fetch_links(&format!("{}/", base_url)).await {
        FetchOutcome::Links(links) => links,
        FetchOutcome::Failed { reason } => panic!("fetch failed: {}", reason),
    };

    assert_eq!(links.len(), 4);
    assert!(links.contains(&format!("{}/page1", base_url)));
    assert!(links.contains(&format!("{}/page2", base_url)));
    assert!(links.contains(&format!("{}/page3", base_url)));
    assert!(links.contains("https://other.example/"));
}

#[tokio::test]
async fn test_fetcher_http_error_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_config(&mock_server.uri(), 1)).unwrap();
    let outcome = fetcher
        .fetch_links(&format!("{}/missing", mock_server.uri()))
        .await;

    assert_eq!(outcome, FetchOutcome::failed("HTTP 404"));
}

#[tokio::test]
async fn test_fetcher_non_html_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"a": 1}"#, "application/json"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&test_config(&mock_server.uri(), 1)).unwrap();
    let outcome = fetcher
        .fetch_links(&format!("{}/data.json", mock_server.uri()))
        .await;

    assert!(outcome.is_failure());
}

#[tokio::test]
async fn test_fetcher_timeout_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("slow").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let config = test_config(&mock_server.uri(), 1).with_fetch_timeout(Duration::from_millis(200));
    let fetcher = HttpFetcher::new(&config).unwrap();
    let outcome = fetcher
        .fetch_links(&format!("{}/slow", mock_server.uri()))
        .await;

    assert_eq!(outcome, FetchOutcome::failed("Request timeout"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Index page links to two pages
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/page1">1</a><a href="/page2">2</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    // page1 links back to the index and on to page3
    Mock::given(method("GET"))
        .and(path("/page1"))
        .respond_with(html(r#"<a href="/">home</a><a href="/page3">3</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    // page2 is broken
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    // page3 sits at the depth limit; its link is never followed
    Mock::given(method("GET"))
        .and(path("/page3"))
        .respond_with(html(r#"<a href="/page4">4</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/page4"))
        .respond_with(html(""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let start_url = format!("{}/", base_url);
    let crawler = Crawler::with_http(test_config(&start_url, 2)).expect("Failed to create crawler");

    let report = tokio::time::timeout(Duration::from_secs(30), crawler.run())
        .await
        .expect("crawl did not terminate")
        .expect("crawl failed");

    let mut expected = vec![
        format!("{}/", base_url),
        format!("{}/page1", base_url),
        format!("{}/page2", base_url),
        format!("{}/page3", base_url),
    ];
    expected.sort();
    assert_eq!(report.seen, expected);

    assert_eq!(report.statistics.pages_fetched, 4);
    assert_eq!(report.statistics.fetch_failures, 1);
    assert_eq!(report.statistics.duplicate_links, 1);
    assert_eq!(report.statistics.links_beyond_depth, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_depth_zero_fetches_only_start_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(r#"<a href="/a">a</a><a href="/b">b</a>"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html(""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let start_url = format!("{}/", mock_server.uri());
    let crawler = Crawler::with_http(test_config(&start_url, 0)).unwrap();
    let report = crawler.run().await.unwrap();

    assert_eq!(report.seen, vec![start_url]);
    assert_eq!(report.statistics.pages_fetched, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_unreachable_start_still_completes() {
    let config = test_config("http://127.0.0.1:9/", 3).with_fetch_timeout(Duration::from_millis(500));
    let crawler = Crawler::with_http(config).unwrap();

    let report = crawler.run().await.unwrap();

    assert_eq!(report.seen, vec!["http://127.0.0.1:9/".to_string()]);
    assert_eq!(report.statistics.fetch_failures, 1);
}
