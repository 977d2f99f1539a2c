// tests/http_api.rs
//
// HttpNewsApi against a local axum server bound to an ephemeral port.

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use std::collections::HashMap;

use news_sentiment_etl::extract::{extract_sources, ApiError, HttpNewsApi, NewsApi};
use news_sentiment_etl::ApiConfig;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn app() -> Router {
    Router::new()
        .route(
            "/echo",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                Json(json!({"status": "ok", "echo": q}))
            }),
        )
        .route(
            "/bad-key",
            get(|| async {
                Json(json!({"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid."}))
            }),
        )
        .route(
            "/no-code",
            get(|| async { Json(json!({"status": "error"})) }),
        )
        .route("/not-json", get(|| async { "<html>oops</html>" }))
        .route(
            "/boom",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/v2/top-headlines/sources",
            get(|| async {
                Json(json!({"status": "ok", "sources": [{"id": "abc-news", "name": "ABC News"}]}))
            }),
        )
}

#[tokio::test]
async fn query_params_are_sent_and_ok_body_returned() {
    let base = spawn(app()).await;
    let api = HttpNewsApi::new(5).unwrap();

    let v = api
        .get_json(
            &format!("{base}/echo"),
            &[("apiKey", "k".to_string()), ("sources", "abc-news".to_string())],
        )
        .await
        .unwrap();

    assert_eq!(v["echo"]["apiKey"], "k");
    assert_eq!(v["echo"]["sources"], "abc-news");
}

#[tokio::test]
async fn error_bodies_are_classified() {
    let base = spawn(app()).await;
    let api = HttpNewsApi::new(5).unwrap();

    let err = api.get_json(&format!("{base}/bad-key"), &[]).await.unwrap_err();
    assert_eq!(err, ApiError::InvalidApiKey("Your API key is invalid.".into()));

    let err = api.get_json(&format!("{base}/no-code"), &[]).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Unexpected {
            code: "unexpectedError".into(),
            message: "Unknown API error".into()
        }
    );

    let err = api.get_json(&format!("{base}/not-json"), &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedBody(_)));
}

#[tokio::test]
async fn non_2xx_is_a_transport_error() {
    let base = spawn(app()).await;
    let api = HttpNewsApi::new(5).unwrap();

    let err = api.get_json(&format!("{base}/boom"), &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let api = HttpNewsApi::new(1).unwrap();
    // Port 9 on loopback has no listener.
    let err = api.get_json("http://127.0.0.1:9/x", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn sources_extraction_over_http() {
    let base = spawn(app()).await;
    let api = HttpNewsApi::new(5).unwrap();
    let mut cfg = ApiConfig::new("k");
    cfg.base_url = format!("{base}/v2");

    let sources = extract_sources(&api, &cfg).await.unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name.as_deref(), Some("ABC News"));
}

