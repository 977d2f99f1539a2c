// src/config/env.rs
use anyhow::{bail, Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

use super::{
    ENV_API_KEY, ENV_CYCLE_INTERVAL, ENV_CYCLE_NUMBER, ENV_DAYS_BACK, ENV_FAILURE_POLICY,
    ENV_MAX_ARTICLE_AGE, ENV_REQUEST_INTERVAL, ENV_REQUEST_LIMIT,
};

/// Which data source a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RunEnv {
    /// Replay previously persisted raw CSVs; no API calls.
    Test,
    /// Extract from the live API.
    Dev,
}

impl RunEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunEnv::Test => "test",
            RunEnv::Dev => "dev",
        }
    }

    pub fn env_file_name(&self) -> String {
        format!(".env.{}", self.as_str())
    }
}

impl fmt::Display for RunEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys a previous environment may have left behind.
const PIPELINE_KEYS: &[&str] = &[
    ENV_API_KEY,
    ENV_REQUEST_LIMIT,
    ENV_REQUEST_INTERVAL,
    ENV_MAX_ARTICLE_AGE,
    ENV_DAYS_BACK,
    ENV_CYCLE_NUMBER,
    ENV_CYCLE_INTERVAL,
    ENV_FAILURE_POLICY,
];

pub fn cleanup_previous_env() {
    for key in PIPELINE_KEYS {
        std::env::remove_var(key);
    }
}

/// Clear stale pipeline keys, then load `<dir>/.env.<env>` overriding the
/// process environment. Returns the file that was loaded.
pub fn setup_env(env: RunEnv, dir: &Path) -> Result<PathBuf> {
    cleanup_previous_env();

    let path = dir.join(env.env_file_name());
    if !path.exists() {
        bail!("Environment file '{}' not found", path.display());
    }
    dotenvy::from_path_override(&path)
        .with_context(|| format!("loading environment from {}", path.display()))?;
    tracing::info!(file = %path.display(), "loaded environment variables");
    Ok(path)
}
