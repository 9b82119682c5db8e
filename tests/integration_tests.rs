//! Integration tests for pubfetch
//!
//! These tests bind the real router to an ephemeral port and talk to it over HTTP,
//! with either a mock works source or a stubbed CrossRef API behind it.

use mockito::Matcher;
use pubfetch::config::Config;
use pubfetch::fetcher::{AuthorMatcher, FetchOptions, PublicationFetcher};
use pubfetch::server::{router, AppState};
use pubfetch::sources::mock::{make_item, matching_items, page_body, MockReply};
use pubfetch::sources::{CrossRefSource, MockWorksSource, WorksSource};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

fn options(rows: usize) -> FetchOptions {
    FetchOptions {
        rows,
        max_pages: 10,
        max_total_time: Duration::from_secs(60),
    }
}

/// Start the app on 127.0.0.1:0 and return its base URL
async fn spawn_app(source: Arc<dyn WorksSource>, options: FetchOptions) -> String {
    let fetcher = PublicationFetcher::new(source, AuthorMatcher::default(), options);
    let state = Arc::new(AppState::new(fetcher, "Brad Dicianno"));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(state)).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn get_json(url: &str) -> (reqwest::StatusCode, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_two_pages_yield_all_matching_records() {
    let source = Arc::new(MockWorksSource::with_bodies(vec![
        page_body(matching_items(1000)),
        page_body(matching_items(300)),
    ]));
    let base = spawn_app(source.clone(), options(1000)).await;

    let (status, body) = get_json(&format!(
        "{}/fetch-publications?author=Brad%20Dicianno",
        base
    ))
    .await;

    assert_eq!(status, reqwest::StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1300);
    for record in records {
        let object = record.as_object().unwrap();
        assert_eq!(object.len(), 4);
        for key in ["title", "link", "year", "citations"] {
            assert!(object.contains_key(key), "missing {}", key);
        }
    }

    let requests = source.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.author == "Brad Dicianno"));
}

#[tokio::test]
async fn test_end_to_end_against_stubbed_crossref() {
    let mut upstream = mockito::Server::new_async().await;
    let first = upstream
        .mock("GET", "/works")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query.author".into(), "Brad Dicianno".into()),
            Matcher::UrlEncoded("rows".into(), "1000".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(matching_items(1000)).to_string())
        .expect(1)
        .create_async()
        .await;
    let second = upstream
        .mock("GET", "/works")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query.author".into(), "Brad Dicianno".into()),
            Matcher::UrlEncoded("offset".into(), "1000".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(matching_items(300)).to_string())
        .expect(1)
        .create_async()
        .await;

    let mut config = Config::default();
    config.crossref.base_url = upstream.url();
    let source = CrossRefSource::from_config(&config.crossref).unwrap();
    let base = spawn_app(Arc::new(source), FetchOptions::from(&config.crossref)).await;

    let (status, body) = get_json(&format!(
        "{}/fetch-publications?author=Brad%20Dicianno",
        base
    ))
    .await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1300);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_default_author_when_parameter_missing() {
    let source = Arc::new(MockWorksSource::with_bodies(vec![page_body(vec![])]));
    let base = spawn_app(source.clone(), options(1000)).await;

    let (status, body) = get_json(&format!("{}/fetch-publications", base)).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, json!([]));
    assert_eq!(source.requests()[0].author, "Brad Dicianno");
}

#[tokio::test]
async fn test_other_author_still_filtered_to_fixed_person() {
    let source = Arc::new(MockWorksSource::with_bodies(vec![page_body(vec![
        make_item("Shared paper", "Brad", "Dicianno"),
        make_item("Someone else", "Jane", "Roe"),
    ])]));
    let base = spawn_app(source.clone(), options(1000)).await;

    let (_, body) = get_json(&format!("{}/fetch-publications?author=Jane%20Roe", base)).await;

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Shared paper");
    assert_eq!(source.requests()[0].author, "Jane Roe");
}

#[tokio::test]
async fn test_sentinels_and_sorting() {
    let items = vec![
        json!({
            "title": ["Rarely cited 4\u{a0}Affiliation"],
            "issued": {"date-parts": [[2012]]},
            "is-referenced-by-count": 2,
            "author": [{"given": "Brad", "family": "Dicianno"}]
        }),
        json!({
            "author": [{"given": "Brad E.", "family": "Dicianno"}]
        }),
        json!({
            "title": ["Often cited"],
            "URL": "http://dx.doi.org/10.1/often",
            "issued": {"date-parts": [[2020, 6]]},
            "is-referenced-by-count": 90,
            "author": [{"given": "BRAD", "family": "DICIANNO"}]
        }),
    ];
    let source = Arc::new(MockWorksSource::with_bodies(vec![page_body(items)]));
    let base = spawn_app(source, options(1000)).await;

    let (status, body) = get_json(&format!("{}/fetch-publications?sort=popular", base)).await;

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"title": "Often cited", "link": "http://dx.doi.org/10.1/often", "year": 2020, "citations": 90},
            {"title": "Rarely cited", "link": "No URL", "year": 2012, "citations": 2},
            {"title": "No title", "link": "No URL", "year": "Unknown", "citations": "Unknown"}
        ])
    );
}

#[tokio::test]
async fn test_unknown_sort_is_bad_request() {
    let source = Arc::new(MockWorksSource::new());
    let base = spawn_app(source.clone(), options(1000)).await;

    let (status, body) = get_json(&format!("{}/fetch-publications?sort=newest", base)).await;

    assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("newest"));
    assert_eq!(source.request_count(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_server_error() {
    let source = Arc::new(MockWorksSource::new());
    source.push_reply(MockReply::NetworkError("connection refused".to_string()));
    let base = spawn_app(source, options(1000)).await;

    let (status, body) = get_json(&format!("{}/fetch-publications", base)).await;

    assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn test_upstream_status_error_is_server_error() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("GET", "/works")
        .match_query(Matcher::Any)
        .with_status(502)
        .create_async()
        .await;

    let source = CrossRefSource::new().unwrap().with_base_url(&upstream.url());
    let base = spawn_app(Arc::new(source), options(1000)).await;

    let response = reqwest::get(format!("{}/fetch-publications", base))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_index_and_health() {
    let base = spawn_app(Arc::new(MockWorksSource::new()), options(1000)).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let content_type = response.headers()[reqwest::header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(response.text().await.unwrap().contains("<ol id=\"publications\">"));

    let response = reqwest::get(format!("{}/static/script.js", base))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let response = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(response.text().await.unwrap(), "OK");
}
