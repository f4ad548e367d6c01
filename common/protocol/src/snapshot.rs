//! Progress snapshot document (§3, §4.11, §6) — the durable JSON state
//! written by the scheduler and RLM under a single serialization lock.

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::failure::ChildFailureResult;
use crate::feature::Feature;
use crate::feature::FeatureStatus;

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: &str = "1";

/// Runtime config values persisted alongside feature state (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    pub max_retries: i32,
    pub max_concurrency: i32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            max_retries: crate::feature::DEFAULT_MAX_RETRIES,
            max_concurrency: 4,
        }
    }
}

/// Per-feature state persisted in the snapshot: `Feature` plus the
/// progress-specific fields listed in §4.11 that `Feature` doesn't already
/// carry itself. Fields `Feature` already owns (`last_error`,
/// `skip_reason`, `adjustments`, `original_model`, `current_model`,
/// `model_switches`, `isolation_level`) are read through `self.feature`
/// rather than re-declared here, so the flattened document has exactly one
/// key per field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureState {
    #[serde(flatten)]
    pub feature: Feature,
    pub test_results_summary: Option<String>,
    pub skipped: bool,
    pub failed_children: Vec<ChildFailureResult>,
}

impl From<Feature> for FeatureState {
    fn from(feature: Feature) -> Self {
        let skipped = feature.status == FeatureStatus::Skipped;
        Self {
            feature,
            test_results_summary: None,
            skipped,
            failed_children: Vec::new(),
        }
    }
}

/// Aggregate state not tied to any one feature (global budget flags etc.).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalState {
    pub needs_acknowledgement: bool,
}

/// The top-level progress snapshot document (§3, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub prd_hash: Option<String>,
    pub features: HashMap<String, FeatureState>,
    pub global_state: GlobalState,
    pub config: SnapshotConfig,
}

impl ProgressSnapshot {
    pub fn new(prd_hash: Option<String>, config: SnapshotConfig) -> Self {
        let now = Utc::now();
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            started_at: now,
            updated_at: now,
            prd_hash,
            features: HashMap::new(),
            global_state: GlobalState::default(),
            config,
        }
    }

    pub fn upsert_feature(&mut self, state: FeatureState, now: DateTime<Utc>) {
        self.features.insert(state.feature.id.clone(), state);
        self.updated_at = now;
    }
}

#[cfg(test)]
#[path = "snapshot.test.rs"]
mod tests;
