// src/extract/articles.rs
//! Per-source article extraction under a request budget with a fixed pause
//! between requests.

use async_trait::async_trait;
use metrics::counter;
use serde::Deserialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::api::{ApiError, NewsApi};
use super::{ensure_metrics_described, log_extract_success};
use crate::config::{ApiConfig, FailurePolicy};
use crate::dates;
use crate::model::{RawArticle, Source};

const EXPECTED_IMPORT_RATE: f64 = 1000.0;
const KIND: &str = "Articles from NewsAPI";

/// Blocks between consecutive requests.
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn pause(&self, d: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepThrottle;

#[async_trait]
impl Throttle for SleepThrottle {
    async fn pause(&self, d: Duration) {
        tokio::time::sleep(d).await;
    }
}

#[derive(Debug, Deserialize)]
struct ApiArticleSource {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiArticle {
    #[serde(default)]
    source: Option<ApiArticleSource>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default, rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl From<ApiArticle> for RawArticle {
    fn from(a: ApiArticle) -> Self {
        let (source_id, source_name) = match a.source {
            Some(s) => (s.id, s.name),
            None => (None, None),
        };
        RawArticle {
            author: a.author,
            title: a.title,
            description: a.description,
            url: a.url,
            url_to_image: a.url_to_image,
            published_at: a.published_at,
            content: a.content,
            source_id,
            source_name,
        }
    }
}

pub struct ArticleExtractor<'a> {
    api: &'a dyn NewsApi,
    throttle: &'a dyn Throttle,
    cfg: &'a ApiConfig,
    policy: FailurePolicy,
}

impl<'a> ArticleExtractor<'a> {
    pub fn new(api: &'a dyn NewsApi, throttle: &'a dyn Throttle, cfg: &'a ApiConfig) -> Self {
        Self {
            api,
            throttle,
            cfg,
            policy: FailurePolicy::FailFast,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Extract articles published on the single day `days_back` days ago.
    pub async fn extract(&self, sources: &[Source], days_back: u32) -> Vec<RawArticle> {
        self.extract_for_date(sources, &dates::date_str(days_back))
            .await
    }

    /// Extract articles for each source (in order) published on `date`.
    ///
    /// At most `request_limit` requests are attempted; the throttle runs
    /// between attempts but never after the last one. Under
    /// [`FailurePolicy::FailFast`] any failing source discards everything
    /// gathered so far and the result is empty.
    pub async fn extract_for_date(&self, sources: &[Source], date: &str) -> Vec<RawArticle> {
        ensure_metrics_described();
        let t0 = Instant::now();

        if sources.is_empty() {
            warn!("No sources provided. Returning empty articles table.");
            info!(duration = ?t0.elapsed(), "Article extraction finished");
            return Vec::new();
        }

        let request_limit = self.cfg.request_limit as usize;
        let interval = Duration::from_secs(self.cfg.interval_seconds);
        let mut all_articles: Vec<RawArticle> = Vec::new();
        let mut request_count = 0usize;

        info!(
            sources = sources.len(),
            date,
            request_limit,
            interval_seconds = self.cfg.interval_seconds,
            policy = ?self.policy,
            "Starting article extraction"
        );

        for source in sources {
            request_count += 1;
            if request_count > request_limit {
                warn!(
                    requests = request_count - 1,
                    "Request limit reached; remaining sources skipped"
                );
                break;
            }

            counter!("extract_requests_total").increment(1);
            match self.fetch_for_source(&source.id, date).await {
                Ok(articles) if articles.is_empty() => {
                    info!(source_id = %source.id, "No articles returned for source");
                }
                Ok(mut articles) => {
                    debug!(source_id = %source.id, count = articles.len(), "Fetched articles");
                    all_articles.append(&mut articles);
                }
                Err(e) => {
                    counter!("extract_request_errors_total").increment(1);
                    match self.policy {
                        FailurePolicy::FailFast => {
                            error!(source_id = %source.id, error = %e, "Failed to fetch articles for source");
                            return Vec::new();
                        }
                        FailurePolicy::BestEffort => {
                            warn!(source_id = %source.id, error = %e, "Failed to fetch articles for source; skipping");
                        }
                    }
                }
            }

            if request_count < request_limit && request_count < sources.len() {
                self.throttle.pause(interval).await;
            }
        }

        if all_articles.is_empty() {
            warn!("No articles extracted from any source.");
            return Vec::new();
        }

        counter!("extract_articles_total").increment(all_articles.len() as u64);
        log_extract_success(KIND, all_articles.len(), t0.elapsed(), EXPECTED_IMPORT_RATE);
        all_articles
    }

    /// One request for one source on one day.
    pub async fn fetch_for_source(
        &self,
        source_id: &str,
        date: &str,
    ) -> Result<Vec<RawArticle>, ApiError> {
        let params = [
            ("apiKey", self.cfg.api_key.clone()),
            ("language", self.cfg.language.clone()),
            ("sortBy", self.cfg.sort_by.clone()),
            ("from", date.to_string()),
            ("to", date.to_string()),
            ("sources", source_id.to_string()),
        ];
        let mut data = self.api.get_json(&self.cfg.articles_url(), &params).await?;

        let list = match data.get_mut("articles").map(Value::take) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(list) => list,
        };
        let articles: Vec<ApiArticle> =
            serde_json::from_value(list).map_err(|e| ApiError::MalformedBody(e.to_string()))?;
        Ok(articles.into_iter().map(RawArticle::from).collect())
    }
}
