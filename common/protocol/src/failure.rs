//! Failure-tracking types shared by the fault isolation engine (C8) and
//! the scheduler (C10).

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::spawn::SpawnRequest;

/// Default max retries for a single failure record (§3).
pub const DEFAULT_MAX_RETRIES: i32 = 3;

/// Details of a single recorded failure (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureInfo {
    pub timestamp: DateTime<Utc>,
    pub reason: String,
    pub error_text: String,
    pub recoverable: bool,
    pub retry_count: i32,
    pub max_retries: i32,
}

impl FailureInfo {
    pub fn new(reason: impl Into<String>, error_text: impl Into<String>, recoverable: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            reason: reason.into(),
            error_text: error_text.into(),
            recoverable,
            retry_count: 0,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// `recoverable && retry_count < max_retries` (§3 `CanRetry`).
    pub fn can_retry(&self) -> bool {
        self.recoverable && self.retry_count < self.max_retries
    }
}

/// Action chosen by the fault isolation engine (or its parent callback) for
/// a failed child (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureAction {
    Retry,
    Skip,
    Abort,
    Handle,
}

/// Result of a child feature's failure, handed to the parent's failure
/// callback (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildFailureResult {
    pub child_id: String,
    pub child_title: String,
    pub parent_id: String,
    pub failure: FailureInfo,
    pub action: FailureAction,
    pub retry_params: Option<SpawnRequest>,
    pub skip_reason: Option<String>,
}

#[cfg(test)]
#[path = "failure.test.rs"]
mod tests;
