// src/logging.rs
//! Tracing setup: compact stderr output plus a daily rolling file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const DEFAULT_LOG_DIR: &str = "logs";
pub const LOG_FILE: &str = "etl_pipeline.log";

/// Install the global subscriber. `RUST_LOG` overrides the default `info`
/// filter.
///
/// The file sink flushes when the returned guard drops, so the caller must
/// hold it until the last event is logged. A second call fails because the
/// global subscriber is already set.
pub fn init_logging(log_dir: Option<&Path>) -> anyhow::Result<WorkerGuard> {
    let dir = log_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let appender = rolling::daily(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    Ok(guard)
}
