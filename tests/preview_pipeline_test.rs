//! Integration tests for link preview resolution through a proxy.

use std::sync::Arc;
use std::time::Duration;

use sidebar_preview::config::Config;
use sidebar_preview::preview::{LinkPreview, PreviewResolver, ProxyFetcher};
use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Page served for https://example.com/a.
const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <title>Fallback Document Title</title>
    <meta name="twitter:title" content="Twitter Title">
    <meta property="og:title" content="Real Title">
    <meta name="description" content="What the article is about">
    <link rel="icon" href="/icons/fav.png">
  </head>
  <body><p>Body text</p></body>
</html>"#;

fn page(title: &str) -> String {
    format!(r#"<html><head><meta property="og:title" content="{title}"></head></html>"#)
}

fn resolver_for(server: &MockServer) -> PreviewResolver {
    let config = Config {
        proxy_url: format!("{}/", server.uri()),
        ..Config::for_testing()
    };
    PreviewResolver::from_config(&config).expect("Failed to build resolver")
}

#[tokio::test]
async fn test_enrichment_through_proxy() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/https:/+example\.com/a$"))
        .and(header("X-Return-Format", "html"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARTICLE_HTML, "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut resolver = resolver_for(&mock_server);
    resolver.set_link(Some("https://example.com/a"));
    resolver.settle().await;

    let preview = resolver.preview().expect("preview should exist");
    assert_eq!(preview.title, "Real Title");
    assert_eq!(preview.hostname, "example.com");
    assert_eq!(
        preview.description.as_deref(),
        Some("What the article is about")
    );
    // Resolved against the target page, not the proxy
    assert_eq!(
        preview.favicon_url.as_deref(),
        Some("https://example.com/icons/fav.png")
    );
}

#[tokio::test]
async fn test_proxy_failure_keeps_fallback() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let mut resolver = resolver_for(&mock_server);
    resolver.set_link(Some("https://example.com/a"));
    resolver.settle().await;

    assert_eq!(
        resolver.preview(),
        Some(LinkPreview {
            hostname: "example.com".to_string(),
            title: "example.com".to_string(),
            description: None,
            favicon_url: Some("https://example.com/favicon.ico".to_string()),
        })
    );
}

#[tokio::test]
async fn test_unreachable_proxy_keeps_fallback() {
    let config = Config {
        // Nothing listens on the discard port
        proxy_url: "http://127.0.0.1:9/".to_string(),
        ..Config::for_testing()
    };
    let mut resolver = PreviewResolver::from_config(&config).unwrap();

    resolver.set_link(Some("https://www.example.com/a"));
    resolver.settle().await;

    let preview = resolver.preview().unwrap();
    assert_eq!(preview.title, "example.com");
    assert_eq!(
        preview.favicon_url.as_deref(),
        Some("https://www.example.com/favicon.ico")
    );
}

#[tokio::test]
async fn test_slow_result_for_replaced_link_is_discarded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"example\.com/one$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page("One"), "text/html")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"example\.org/two$"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page("Two"), "text/html"))
        .mount(&mock_server)
        .await;

    let mut resolver = resolver_for(&mock_server);
    let updates = resolver.subscribe();

    resolver.set_link(Some("https://example.com/one"));
    tokio::time::sleep(Duration::from_millis(50)).await;
    resolver.set_link(Some("https://example.org/two"));
    resolver.settle().await;
    assert_eq!(resolver.preview().unwrap().title, "Two");

    // Give the first response time to arrive
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(resolver.preview().unwrap().title, "Two");
    assert_eq!(
        updates.borrow().as_ref().map(|e| e.link.as_str()),
        Some("https://example.org/two")
    );
}

#[tokio::test]
async fn test_configured_timeout_abandons_enrichment() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page("Too Late"), "text/html")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = ProxyFetcher::new(
        format!("{}/", mock_server.uri()),
        "test-agent",
        Some(Duration::from_millis(100)),
    )
    .unwrap();
    let mut resolver = PreviewResolver::new(Arc::new(fetcher));

    resolver.set_link(Some("https://example.com/a"));
    resolver.settle().await;

    assert_eq!(resolver.preview().unwrap().title, "example.com");
}

#[tokio::test]
async fn test_malformed_link_sends_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page("Nope"), "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut resolver = resolver_for(&mock_server);
    resolver.set_link(Some("not a url"));
    resolver.settle().await;

    assert_eq!(resolver.preview(), None);
    assert_eq!(resolver.label().as_deref(), Some("not a url"));
}

#[tokio::test]
async fn test_disabled_enrichment_sends_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ARTICLE_HTML, "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = Config {
        proxy_url: format!("{}/", mock_server.uri()),
        preview_enabled: false,
        ..Config::for_testing()
    };
    let mut resolver = PreviewResolver::from_config(&config).unwrap();
    resolver.set_link(Some("https://example.com/a"));
    resolver.settle().await;

    assert_eq!(resolver.preview().unwrap().title, "example.com");
}
