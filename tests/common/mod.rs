// tests/common/mod.rs
// Test doubles for the API and throttle seams.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use news_sentiment_etl::extract::{ApiError, NewsApi, Throttle};

/// Replays queued responses in order; once the queue is drained every call
/// returns an empty `ok` article list.
pub struct StubApi {
    pub responses: Mutex<VecDeque<Result<Value, ApiError>>>,
    pub calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl StubApi {
    pub fn new(responses: Vec<Result<Value, ApiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(vec![]),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Value of `key` in the n-th call's params.
    pub fn param(&self, call: usize, key: &str) -> Option<String> {
        self.calls.lock().unwrap()[call]
            .1
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl NewsApi for StubApi {
    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push((
            url.to_string(),
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"status": "ok", "articles": []})))
    }
}

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordingThrottle {
    pub pauses: Mutex<Vec<Duration>>,
}

impl RecordingThrottle {
    pub fn count(&self) -> usize {
        self.pauses.lock().unwrap().len()
    }
}

#[async_trait]
impl Throttle for RecordingThrottle {
    async fn pause(&self, d: Duration) {
        self.pauses.lock().unwrap().push(d);
    }
}

/// One article as the API returns it.
pub fn api_article(url: &str, source_id: &str, author: Option<&str>, published_at: &str) -> Value {
    json!({
        "source": {"id": source_id, "name": "ABC News"},
        "author": author,
        "title": format!("Title for {url}"),
        "description": "Markets rallied after strong earnings.",
        "url": url,
        "urlToImage": null,
        "publishedAt": published_at,
        "content": "..."
    })
}

pub fn ok_articles(articles: Vec<Value>) -> Result<Value, ApiError> {
    Ok(json!({"status": "ok", "totalResults": articles.len(), "articles": articles}))
}

pub fn source(id: &str) -> news_sentiment_etl::model::Source {
    news_sentiment_etl::model::Source {
        id: id.into(),
        name: Some(id.to_uppercase()),
        ..Default::default()
    }
}
