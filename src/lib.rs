// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod dates;
pub mod extract;
pub mod load;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod sentiment;
pub mod transform;

// ---- Re-exports for stable public API ----
pub use crate::config::{ApiConfig, EtlConfig, FailurePolicy, PipelineConfig, RunEnv, StorageConfig};
pub use crate::pipeline::Pipeline;
pub use crate::sentiment::{LexiconScorer, PolarityScores, SentimentScorer};
pub use crate::transform::{transform_data, TransformOutput};
