//! News sentiment ETL binary entrypoint.
//!
//! Loads `.env.<env>`, builds the pipeline configuration and runs the
//! configured number of extract → transform → load cycles. Any failure ends
//! the process with exit status 1.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use news_sentiment_etl::config::env::setup_env;
use news_sentiment_etl::extract::{HttpNewsApi, SleepThrottle};
use news_sentiment_etl::logging::init_logging;
use news_sentiment_etl::{LexiconScorer, Pipeline, PipelineConfig, RunEnv};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Environment to run: `test` replays raw CSVs, `dev` calls the API
    #[arg(value_enum)]
    env: RunEnv,

    /// Directory holding the `.env.<env>` files
    #[arg(long, default_value = ".")]
    env_dir: PathBuf,

    /// Directory for rolling log files
    #[arg(long, env = "ETL_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    setup_env(cli.env, &cli.env_dir)?;
    let cfg = PipelineConfig::load(cli.env)?;

    let timeout = cfg.api.as_ref().map(|a| a.timeout_secs).unwrap_or(10);
    let api = HttpNewsApi::new(timeout)?;
    let throttle = SleepThrottle;
    let scorer = LexiconScorer::new();

    let pipeline = Pipeline {
        cfg: &cfg,
        api: &api,
        throttle: &throttle,
        scorer: &scorer,
    };
    let cycles = pipeline.run().await?;
    info!(cycles, "Pipeline finished");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // held until return so the file sink flushes
    let _log_guard = match init_logging(cli.log_dir.as_deref()) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("logging setup failed: {e:#}");
            None
        }
    };

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(env = %cli.env, error = %format!("{e:#}"), "ETL run failed");
            ExitCode::FAILURE
        }
    }
}
