//! Resolved configuration values (§4.13).

use conductor_protocol::feature::DEFAULT_MAX_ADJUSTMENTS;
use conductor_protocol::feature::DEFAULT_MAX_DEPTH;
use conductor_protocol::feature::DEFAULT_MAX_RETRIES;
use conductor_protocol::feature::MIN_CONTEXT_BUDGET;
use serde::Deserialize;
use serde::Serialize;

/// The concrete model identifier a worker is invoked with for each tier
/// (§6 "the model tier is passed only when non-default").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTierNames {
    pub cheap: String,
    pub mid: String,
    pub premium: String,
}

impl Default for ModelTierNames {
    fn default() -> Self {
        Self { cheap: "haiku".to_string(), mid: "sonnet".to_string(), premium: "opus".to_string() }
    }
}

/// Fully-resolved runtime configuration (§4.13). Constructed by merging,
/// in ascending priority, built-in defaults, `conductor.toml`, environment
/// variables, and explicit CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Executable name/path used to launch each worker (§6).
    pub worker_command: String,
    /// Max concurrently-running worker subprocesses (§4.9, §4.10).
    pub max_concurrency: usize,
    /// Default max-retries before a feature becomes terminally `failed`.
    pub max_retries: i32,
    /// Default max-depth cap for the recursive feature tree (§4.7).
    pub max_depth: i32,
    /// Default bound on the adjustments log per feature (§9, fixed at 3).
    pub max_adjustments: i32,
    /// Base context budget (tokens) handed to root features (§4.6).
    pub base_context_budget: i64,
    /// Process-wide token budget; `None` means unbounded (§4.5).
    pub global_token_budget: Option<i64>,
    /// Process-wide USD budget; `None` means unbounded (§4.5).
    pub global_usd_budget: Option<f64>,
    /// Model identifiers passed to the worker for each tier.
    pub model_tiers: ModelTierNames,
    /// Path the progress snapshot is written to/loaded from (§4.11).
    pub progress_path: String,
    /// Legacy progress path fallback (§4.11 "fall back to a legacy
    /// `progress.md`").
    pub legacy_progress_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_command: "claude".to_string(),
            max_concurrency: 4,
            max_retries: DEFAULT_MAX_RETRIES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_adjustments: DEFAULT_MAX_ADJUSTMENTS,
            base_context_budget: MIN_CONTEXT_BUDGET * 10,
            global_token_budget: None,
            global_usd_budget: None,
            model_tiers: ModelTierNames::default(),
            progress_path: "progress.json".to_string(),
            legacy_progress_path: "progress.md".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "types.test.rs"]
mod tests;
