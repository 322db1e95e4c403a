//! Integration tests for `PageFetcher` and `BatchProcessor`.
//!
//! Uses `wiremock` to stand up a local HTTP server per test. Unreachable
//! targets point at `127.0.0.1:1`, where nothing listens, so the failure is a
//! fast connection refusal rather than a DNS lookup.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mailsift_core::Target;
use mailsift_scraper::{BatchProcessor, FetchOptions, PageFetcher, ScraperError};

const UNREACHABLE: &str = "127.0.0.1:1";

fn test_fetcher() -> PageFetcher {
    let options = FetchOptions {
        timeout_secs: 5,
        user_agent: "mailsift-test/0.1".to_string(),
        accept_invalid_certs: false,
    };
    PageFetcher::new(&options).expect("failed to build test PageFetcher")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

/// The mock server URI without its `http://` prefix, as a user would type it.
fn schemeless(server: &MockServer) -> String {
    server
        .uri()
        .trim_start_matches("http://")
        .to_string()
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_body_and_sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .and(header("user-agent", "mailsift-test/0.1"))
        .respond_with(html_page("<p>hello</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let target = Target::parse(&format!("{}/contact", server.uri())).unwrap();
    let page = test_fetcher().fetch(&target).await.expect("fetch ok");

    assert_eq!(page.status, 200);
    assert_eq!(page.body, "<p>hello</p>");
}

#[tokio::test]
async fn fetch_returns_body_of_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing: admin@site.com"))
        .mount(&server)
        .await;

    let target = Target::parse(&server.uri()).unwrap();
    let page = test_fetcher().fetch(&target).await.expect("404 is not a transport error");

    assert_eq!(page.status, 404);
    assert!(page.body.contains("admin@site.com"));
}

#[tokio::test]
async fn fetch_refused_connection_is_unreachable() {
    let target = Target::parse(UNREACHABLE).unwrap();
    let err = test_fetcher().fetch(&target).await.unwrap_err();

    assert!(
        matches!(err, ScraperError::Unreachable { ref url, .. } if url == "http://127.0.0.1:1"),
        "expected Unreachable, got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_times_out_as_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_page("late").set_delay(std::time::Duration::from_secs(3)))
        .mount(&server)
        .await;

    let options = FetchOptions {
        timeout_secs: 1,
        ..FetchOptions::default()
    };
    let fetcher = PageFetcher::new(&options).unwrap();
    let target = Target::parse(&server.uri()).unwrap();
    let err = fetcher.fetch(&target).await.unwrap_err();

    match err {
        ScraperError::Unreachable { reason, .. } => {
            assert!(reason.contains("timed out"), "unexpected reason: {reason}");
        }
        other => panic!("expected Unreachable, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// BatchProcessor::scrape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scrape_extracts_visible_emails_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_page(
            r#"<html><head><script>var x = "hidden@tracker.com";</script></head>
            <body><p>Write to <b>sales@shop.com</b> or support@shop.com.</p>
            <footer>sales@shop.com</footer></body></html>"#,
        ))
        .mount(&server)
        .await;

    let processor = BatchProcessor::new(test_fetcher(), 1);
    let target = Target::parse(&schemeless(&server)).unwrap();
    let emails = processor.scrape(&target).await.expect("scrape ok");

    assert_eq!(emails, vec!["sales@shop.com", "support@shop.com"]);
}

// ---------------------------------------------------------------------------
// BatchProcessor::process
// ---------------------------------------------------------------------------

#[tokio::test]
async fn process_skips_blank_entries_and_isolates_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_page("<p>hello@good.com</p>"))
        .mount(&server)
        .await;

    let good = schemeless(&server);
    let urls = vec![good.clone(), String::new(), UNREACHABLE.to_string()];
    let records = BatchProcessor::new(test_fetcher(), 1).process(&urls).await;

    assert_eq!(records.len(), 2, "blank entry must not produce a record");

    assert_eq!(records[0].url, format!("http://{good}"));
    assert!(records[0].success);
    assert_eq!(records[0].emails, vec!["hello@good.com"]);
    assert!(records[0].error.is_none());

    assert_eq!(records[1].url, "http://127.0.0.1:1");
    assert!(!records[1].success);
    assert!(records[1].emails.is_empty());
    assert!(records[1].error.as_deref().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn process_skips_whitespace_only_entries() {
    let urls = ["   ", "\t", ""];
    let records = BatchProcessor::new(test_fetcher(), 1).process(&urls).await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn process_preserves_input_order_when_concurrent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            html_page("<p>slow@a.com</p>").set_delay(std::time::Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fast"))
        .respond_with(html_page("<p>fast@b.com</p>"))
        .mount(&server)
        .await;

    let urls = vec![
        format!("{}/slow", server.uri()),
        UNREACHABLE.to_string(),
        format!("{}/fast", server.uri()),
    ];
    let records = BatchProcessor::new(test_fetcher(), 3).process(&urls).await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].emails, vec!["slow@a.com"]);
    assert!(!records[1].success);
    assert_eq!(records[2].emails, vec!["fast@b.com"]);
}

#[tokio::test]
async fn process_records_success_with_no_emails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_page("<p>nothing to see</p>"))
        .mount(&server)
        .await;

    let records = BatchProcessor::new(test_fetcher(), 1)
        .process(&[server.uri()])
        .await;

    assert_eq!(records.len(), 1);
    assert!(records[0].success);
    assert!(records[0].emails.is_empty());
}

#[tokio::test]
async fn scrape_url_rejects_blank_input() {
    let processor = BatchProcessor::new(test_fetcher(), 1);
    let err = processor.scrape_url("   ").await.unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidInput(_)),
        "expected InvalidInput, got: {err:?}"
    );
}
