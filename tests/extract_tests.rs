//! End-to-end engine tests against a loopback HTTP server.
//!
//! These exercise the full fetch → parse → extract pipeline without touching
//! the network: wiremock serves the fixture documents.

mod common;

use std::time::Duration;

use unfurl_server::error::{FetchError, PreviewError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve_html(html: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;
    server
}

fn page_url(server: &MockServer) -> String {
    format!("{}/a", server.uri())
}

#[tokio::test]
async fn unfurls_a_page_with_only_an_og_title() {
    let server = serve_html(
        r#"<html><head><meta property="og:title" content="Hello"></head><body></body></html>"#,
    )
    .await;

    let preview = common::test_extractor()
        .extract_preview(&page_url(&server))
        .await
        .unwrap();

    assert_eq!(preview.url, page_url(&server));
    assert_eq!(preview.title.as_deref(), Some("Hello"));
    assert_eq!(preview.description, None);
    assert_eq!(preview.image, None);
    assert_eq!(preview.html, None);
    assert_eq!(preview.nft, None);
    // Hostname fallback: the loopback server has no og:site_name.
    assert_eq!(preview.site.as_deref(), Some("127.0.0.1"));
    assert!(preview.favicon.ends_with("/favicon.ico"));
}

#[tokio::test]
async fn og_title_wins_over_title_element() {
    let server = serve_html(
        r#"<html><head>
            <title>Element Title</title>
            <meta property="og:title" content="OG Title">
        </head></html>"#,
    )
    .await;

    let preview = common::test_extractor()
        .extract_preview(&page_url(&server))
        .await
        .unwrap();

    assert_eq!(preview.title.as_deref(), Some("OG Title"));
}

#[tokio::test]
async fn page_without_metadata_still_unfurls() {
    let server = serve_html("<html><body><h1>nothing to see</h1></body></html>").await;

    let preview = common::test_extractor()
        .extract_preview(&page_url(&server))
        .await
        .unwrap();

    assert!(preview.title.is_none());
    assert!(preview.description.is_none());
    assert!(preview.image.is_none());
    assert!(preview.html.is_none());
    assert!(preview.nft.is_none());
    assert!(!preview.favicon.is_empty());
}

#[tokio::test]
async fn partial_nft_cluster_resolves_to_null() {
    let server = serve_html(
        r#"<html><head>
            <meta property="eth:nft:contract_address" content="0xabc">
        </head></html>"#,
    )
    .await;

    let preview = common::test_extractor()
        .extract_preview(&page_url(&server))
        .await
        .unwrap();

    assert!(preview.nft.is_none());
}

#[tokio::test]
async fn og_video_yields_a_sandboxed_frame() {
    let server = serve_html(
        r#"<html><head>
            <meta property="og:video" content="https://player.example/embed/1">
        </head></html>"#,
    )
    .await;

    let preview = common::test_extractor()
        .extract_preview(&page_url(&server))
        .await
        .unwrap();

    let markup = preview.html.unwrap();
    assert!(markup.contains(r#"src="https://player.example/embed/1""#));
    assert!(markup.contains("sandbox=\""));
    assert!(!markup.contains("allow-scripts"));
    assert!(!markup.to_lowercase().contains("<script"));
}

#[tokio::test]
async fn slow_upstream_times_out_with_no_preview() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = common::test_extractor()
        .extract_preview(&page_url(&server))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PreviewError::Fetch(FetchError::Timeout { .. })
    ));
}

#[tokio::test]
async fn non_success_status_is_terminal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = common::test_extractor()
        .extract_preview(&page_url(&server))
        .await
        .unwrap_err();

    match err {
        PreviewError::Fetch(FetchError::Status { status, .. }) => {
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_transport_failure() {
    let server = MockServer::start().await;
    let url = page_url(&server);
    drop(server);

    let err = common::test_extractor()
        .extract_preview(&url)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PreviewError::Fetch(FetchError::Transport { .. })
    ));
}

#[tokio::test]
async fn repeated_extraction_is_idempotent() {
    let server = serve_html(
        r#"<html><head>
            <meta property="og:title" content="Hello">
            <meta property="og:description" content="A description">
            <meta property="og:image" content="/card.png">
        </head></html>"#,
    )
    .await;

    let engine = common::test_extractor();
    let first = engine.extract_preview(&page_url(&server)).await.unwrap();
    let mut second = engine.extract_preview(&page_url(&server)).await.unwrap();

    // Everything except the extraction timestamp must be byte-identical.
    second.last_indexed_at = first.last_indexed_at;
    assert_eq!(first, second);
}

#[tokio::test]
async fn invalid_input_fails_before_any_fetch() {
    let err = common::test_extractor()
        .extract_preview("not-a-url")
        .await
        .unwrap_err();

    assert!(matches!(err, PreviewError::InvalidUrl(_)));
}
