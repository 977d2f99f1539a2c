// tests/extract_sources.rs

mod common;

use common::StubApi;
use news_sentiment_etl::extract::{extract_sources, ApiError};
use news_sentiment_etl::ApiConfig;
use serde_json::json;

fn cfg() -> ApiConfig {
    let mut c = ApiConfig::new("secret");
    c.base_url = "http://stub".into();
    c
}

#[tokio::test]
async fn sources_listing_is_typed_and_request_is_shaped() {
    let api = StubApi::new(vec![Ok(json!({
        "status": "ok",
        "sources": [
            {"id": "abc-news", "name": "ABC News", "description": "d", "url": "https://abcnews.go.com",
             "category": "general", "language": "en", "country": "us"},
            {"id": "bbc-news", "name": "BBC News"}
        ]
    }))]);

    let out = extract_sources(&api, &cfg()).await.unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].id, "abc-news");
    assert_eq!(out[0].country.as_deref(), Some("us"));
    assert_eq!(out[1].category, None);

    let calls = api.calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "http://stub/top-headlines/sources");
    drop(calls);
    assert_eq!(api.param(0, "apiKey").as_deref(), Some("secret"));
    assert_eq!(api.param(0, "language").as_deref(), Some("en"));
}

#[tokio::test]
async fn empty_listing_is_not_an_error() {
    let api = StubApi::new(vec![Ok(json!({"status": "ok", "sources": []}))]);
    let out = extract_sources(&api, &cfg()).await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn api_failure_is_wrapped() {
    let api = StubApi::new(vec![Err(ApiError::InvalidApiKey("bad key".into()))]);
    let err = extract_sources(&api, &cfg()).await.unwrap_err();

    assert_eq!(err.0, ApiError::InvalidApiKey("bad key".into()));
    assert!(err.to_string().contains("failed to extract sources"));
}

#[tokio::test]
async fn ok_body_without_sources_key_is_empty() {
    let api = StubApi::new(vec![Ok(json!({"status": "ok"}))]);
    let out = extract_sources(&api, &cfg()).await.unwrap();
    assert!(out.is_empty());
    assert_eq!(api.call_count(), 1);
}
