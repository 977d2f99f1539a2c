// src/extract/sources.rs
use serde_json::Value;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, warn};

use super::api::{ApiError, NewsApi};
use super::log_extract_success;
use crate::config::ApiConfig;
use crate::model::Source;

const EXPECTED_IMPORT_RATE: f64 = 0.001;
const KIND: &str = "Sources from NewsAPI";

#[derive(Debug, Error)]
#[error("failed to extract sources: {0}")]
pub struct SourceExtractionError(#[from] pub ApiError);

/// Fetch every source the API lists for the configured language.
///
/// An empty listing is not an error; it is logged and returned as-is.
pub async fn extract_sources(
    api: &dyn NewsApi,
    cfg: &ApiConfig,
) -> Result<Vec<Source>, SourceExtractionError> {
    let t0 = Instant::now();
    let sources = match fetch_sources(api, cfg).await {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "Failed to extract sources");
            return Err(e.into());
        }
    };

    if sources.is_empty() {
        warn!("No sources returned from API.");
        return Ok(sources);
    }

    log_extract_success(KIND, sources.len(), t0.elapsed(), EXPECTED_IMPORT_RATE);
    Ok(sources)
}

async fn fetch_sources(api: &dyn NewsApi, cfg: &ApiConfig) -> Result<Vec<Source>, ApiError> {
    let params = [
        ("apiKey", cfg.api_key.clone()),
        ("language", cfg.language.clone()),
    ];
    let mut data = api.get_json(&cfg.sources_url(), &params).await?;

    match data.get_mut("sources").map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(list) => serde_json::from_value(list).map_err(|e| ApiError::MalformedBody(e.to_string())),
    }
}
