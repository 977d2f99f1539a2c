// src/pipeline.rs
//! One ETL cycle (extract → transform → load) and the multi-cycle driver.

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::config::PipelineConfig;
use crate::extract::{extract_data, NewsApi, Throttle};
use crate::load::load_data;
use crate::sentiment::SentimentScorer;
use crate::transform::{transform_data, TransformOutput};

/// Collaborators for a run; each one is a narrow seam so tests can stub it.
pub struct Pipeline<'a> {
    pub cfg: &'a PipelineConfig,
    pub api: &'a dyn NewsApi,
    pub throttle: &'a dyn Throttle,
    pub scorer: &'a dyn SentimentScorer,
}

impl Pipeline<'_> {
    /// Run a single cycle and return the tables it persisted.
    pub async fn run_cycle(&self) -> Result<TransformOutput> {
        let env = self.cfg.env;
        info!(%env, "Starting ETL cycle");

        info!("Running extraction phase");
        let extracted = extract_data(self.cfg, self.api, self.throttle)
            .await
            .with_context(|| format!("Data extraction failed in {env} environment"))?;
        info!("Data extraction complete");

        info!("Running transformation phase");
        let output = transform_data(
            extracted.sources,
            extracted.articles,
            self.cfg.etl.max_article_age_days,
            Local::now().date_naive(),
            self.scorer,
        );
        info!("Data transformation complete");

        info!("Running load phase");
        load_data(&output, &self.cfg.storage).context("Data load failed")?;
        info!("Data load complete");

        info!("ETL pipeline completed successfully");
        Ok(output)
    }

    /// Run `cycle_num` cycles, pausing `cycle_interval_hours` between them
    /// (not after the last). Stops at the first failing cycle.
    pub async fn run(&self) -> Result<u32> {
        let cycles = self.cfg.etl.cycle_num;
        let interval = self.cfg.etl.cycle_interval()?;

        for cycle in 1..=cycles {
            self.run_cycle()
                .await
                .with_context(|| format!("ETL cycle {cycle}/{cycles} failed"))?;

            if cycle < cycles {
                info!(
                    cycle,
                    cycles,
                    hours = self.cfg.etl.cycle_interval_hours,
                    "ETL cycle complete. Waiting until next cycle..."
                );
                self.throttle.pause(interval).await;
            } else {
                info!(cycle, cycles, "ETL cycle complete.");
            }
        }

        info!("All ETL cycles completed.");
        Ok(cycles)
    }
}
