// src/config/mod.rs
//! Explicit configuration value objects threaded through every pipeline stage.
//!
//! API and ETL settings come from the process environment (populated from
//! `.env.<env>` by [`env::setup_env`]); storage layout comes from a TOML file
//! with built-in defaults.

pub mod env;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub use env::RunEnv;

pub const ENV_API_KEY: &str = "NEWSAPI_KEY";
pub const ENV_REQUEST_LIMIT: &str = "NEWSAPI_REQUEST_LIMIT";
pub const ENV_REQUEST_INTERVAL: &str = "NEWSAPI_REQUEST_INTERVAL_SECONDS";
pub const ENV_BASE_URL: &str = "NEWSAPI_BASE_URL";
pub const ENV_LANGUAGE: &str = "NEWSAPI_LANGUAGE";
pub const ENV_SORT_BY: &str = "NEWSAPI_SORT_BY";
pub const ENV_MAX_ARTICLE_AGE: &str = "MAX_ARTICLE_AGE_DAYS";
pub const ENV_DAYS_BACK: &str = "DAYS_BACK";
pub const ENV_CYCLE_NUMBER: &str = "CYCLE_NUMBER";
pub const ENV_CYCLE_INTERVAL: &str = "CYCLE_INTERVAL_HOURS";
pub const ENV_FAILURE_POLICY: &str = "EXTRACT_FAILURE_POLICY";
pub const ENV_STORAGE_CONFIG_PATH: &str = "ETL_STORAGE_CONFIG_PATH";

const DEFAULT_STORAGE_CONFIG_PATH: &str = "config/storage.toml";

/// Settings for talking to the upstream news API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub api_key: String,
    pub language: String,
    pub sort_by: String,
    /// Hard ceiling on article requests per extraction call.
    pub request_limit: u32,
    /// Pause between consecutive article requests.
    pub interval_seconds: u64,
    pub base_url: String,
    pub sources_endpoint: String,
    pub articles_endpoint: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            language: "en".to_string(),
            sort_by: "popularity".to_string(),
            request_limit: 95,
            interval_seconds: 15,
            base_url: "https://newsapi.org/v2".to_string(),
            sources_endpoint: "/top-headlines/sources".to_string(),
            articles_endpoint: "/everything".to_string(),
            timeout_secs: 10,
        }
    }

    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("Configuration error: {ENV_API_KEY} is not set"))?;

        let mut cfg = Self::new(api_key);
        cfg.request_limit = env_parse(ENV_REQUEST_LIMIT, cfg.request_limit)?;
        cfg.interval_seconds = env_parse(ENV_REQUEST_INTERVAL, cfg.interval_seconds)?;
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            cfg.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(lang) = std::env::var(ENV_LANGUAGE) {
            cfg.language = lang;
        }
        if let Ok(sort) = std::env::var(ENV_SORT_BY) {
            cfg.sort_by = sort;
        }
        Ok(cfg)
    }

    pub fn sources_url(&self) -> String {
        format!("{}{}", self.base_url, self.sources_endpoint)
    }

    pub fn articles_url(&self) -> String {
        format!("{}{}", self.base_url, self.articles_endpoint)
    }
}

/// What the article extractor does when a single source fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole extraction call and return no articles.
    #[default]
    FailFast,
    /// Log the failure, skip the source and keep going.
    BestEffort,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "fail-fast" | "failfast" => Ok(Self::FailFast),
            "best-effort" | "besteffort" => Ok(Self::BestEffort),
            other => bail!("unknown failure policy: {other}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    pub max_article_age_days: u32,
    /// The article window is the single calendar day this many days ago.
    pub days_back: u32,
    pub cycle_num: u32,
    pub cycle_interval_hours: f64,
    pub failure_policy: FailurePolicy,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            max_article_age_days: 7,
            days_back: 2,
            cycle_num: 1,
            cycle_interval_hours: 24.0,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl EtlConfig {
    pub fn from_env() -> Result<Self> {
        let d = Self::default();
        let cfg = Self {
            max_article_age_days: env_parse(ENV_MAX_ARTICLE_AGE, d.max_article_age_days)?,
            days_back: env_parse(ENV_DAYS_BACK, d.days_back)?,
            cycle_num: env_parse(ENV_CYCLE_NUMBER, d.cycle_num)?,
            cycle_interval_hours: env_parse(ENV_CYCLE_INTERVAL, d.cycle_interval_hours)?,
            failure_policy: env_parse(ENV_FAILURE_POLICY, d.failure_policy)?,
        };
        if !cfg.cycle_interval_hours.is_finite() || cfg.cycle_interval_hours < 0.0 {
            bail!("{ENV_CYCLE_INTERVAL} must be a non-negative number");
        }
        cfg.cycle_interval()?;
        Ok(cfg)
    }

    /// Pause between cycles. Fails when the hours do not fit a `Duration`.
    pub fn cycle_interval(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.cycle_interval_hours * 3600.0).map_err(|e| {
            anyhow!(
                "{ENV_CYCLE_INTERVAL} out of range: {} ({e})",
                self.cycle_interval_hours
            )
        })
    }
}

/// Where raw and clean tables live on disk.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub raw_dir: PathBuf,
    pub clean_dir: PathBuf,
    pub raw_sources: String,
    pub raw_articles: String,
    pub clean_sources: String,
    pub clean_articles: String,
    pub clean_authors: String,
    pub clean_author_article: String,
    pub clean_sources_articles: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            raw_dir: PathBuf::from("data/raw"),
            clean_dir: PathBuf::from("data/clean"),
            raw_sources: "sources.csv".into(),
            raw_articles: "articles.csv".into(),
            clean_sources: "sources.csv".into(),
            clean_articles: "articles.csv".into(),
            clean_authors: "authors.csv".into(),
            clean_author_article: "author_article.csv".into(),
            clean_sources_articles: "sources_articles.csv".into(),
        }
    }
}

impl StorageConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading storage config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("parsing storage config {}", path.display()))
    }

    /// Resolve storage config:
    /// 1) $ETL_STORAGE_CONFIG_PATH
    /// 2) config/storage.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_STORAGE_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            bail!("{ENV_STORAGE_CONFIG_PATH} points to non-existent path");
        }
        let default_p = PathBuf::from(DEFAULT_STORAGE_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::default())
    }

    pub fn raw_sources_path(&self) -> PathBuf {
        self.raw_dir.join(&self.raw_sources)
    }

    pub fn raw_articles_path(&self) -> PathBuf {
        self.raw_dir.join(&self.raw_articles)
    }
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub env: RunEnv,
    pub etl: EtlConfig,
    pub storage: StorageConfig,
    /// Only required when extracting from the live API.
    pub api: Option<ApiConfig>,
}

impl PipelineConfig {
    pub fn load(env: RunEnv) -> Result<Self> {
        let api = match env {
            RunEnv::Dev => Some(ApiConfig::from_env()?),
            RunEnv::Test => None,
        };
        Ok(Self {
            env,
            etl: EtlConfig::from_env()?,
            storage: StorageConfig::load_default()?,
            api,
        })
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
/// A value that is present but unparseable is an error.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("invalid value for {key}: {raw:?} ({e})")),
        _ => Ok(default),
    }
}
