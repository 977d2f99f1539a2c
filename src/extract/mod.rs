// src/extract/mod.rs
pub mod api;
pub mod articles;
pub mod sources;

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{PipelineConfig, RunEnv};
use crate::load::{append_csv, read_csv};
use crate::model::{RawArticle, Source};

pub use api::{handle_api_response, ApiError, HttpNewsApi, NewsApi};
pub use articles::{ArticleExtractor, SleepThrottle, Throttle};
pub use sources::{extract_sources, SourceExtractionError};

/// One-time metrics registration.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("extract_requests_total", "Article requests attempted.");
        describe_counter!(
            "extract_request_errors_total",
            "Article requests that failed."
        );
        describe_counter!(
            "extract_articles_total",
            "Articles returned by a completed extraction."
        );
        describe_histogram!("extract_duration_ms", "Extraction duration in milliseconds.");
    });
}

/// Log shape, duration and throughput of a finished extraction; warn when the
/// rows-per-second rate falls below `expected_rate`.
pub fn log_extract_success(kind: &str, rows: usize, duration: Duration, expected_rate: f64) {
    let secs = duration.as_secs_f64();
    histogram!("extract_duration_ms").record(secs * 1_000.0);

    let rate = if secs > 0.0 {
        rows as f64 / secs
    } else {
        f64::INFINITY
    };
    info!(kind, rows, duration_s = secs, rate, "Data extraction successful");
    if rate < expected_rate {
        warn!(kind, rate, expected_rate, "Extraction slower than expected");
    }
}

/// Both raw tables produced by one extraction phase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedData {
    pub sources: Vec<Source>,
    pub articles: Vec<RawArticle>,
}

/// Run the extraction phase for the configured environment.
///
/// `dev` pulls from the API and appends the raw tables to the raw store;
/// `test` replays the raw store without touching the network.
pub async fn extract_data(
    cfg: &PipelineConfig,
    api: &dyn NewsApi,
    throttle: &dyn Throttle,
) -> Result<ExtractedData> {
    let storage = &cfg.storage;
    let data = match cfg.env {
        RunEnv::Test => {
            let sources: Vec<Source> = read_csv(&storage.raw_sources_path())?;
            let articles: Vec<RawArticle> = read_csv(&storage.raw_articles_path())?;
            info!("Data extraction skipped... Using local data.");
            ExtractedData { sources, articles }
        }
        RunEnv::Dev => {
            let api_cfg = cfg
                .api
                .as_ref()
                .context("API configuration is required in the dev environment")?;

            let sources = extract_sources(api, api_cfg).await?;
            append_csv(&storage.raw_dir, &storage.raw_sources, &sources)?;

            let articles = ArticleExtractor::new(api, throttle, api_cfg)
                .with_policy(cfg.etl.failure_policy)
                .extract(&sources, cfg.etl.days_back)
                .await;
            append_csv(&storage.raw_dir, &storage.raw_articles, &articles)?;

            info!(
                sources = sources.len(),
                articles = articles.len(),
                "Data extraction completed successfully"
            );
            ExtractedData { sources, articles }
        }
    };
    Ok(data)
}
