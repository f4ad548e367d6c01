//! Fault Isolation Engine (C8, §4.8).
//!
//! Tracks failed and skipped children per parent feature and decides what
//! happens next: `handle` (default, parent callback may intervene),
//! `retry`, `skip`, or `abort`. Grounded on the typed-error/status-code
//! pairing used across this workspace and on a request/response style
//! decision record, generalized here to the retry/skip/abort lifecycle of
//! a child failure.

pub mod error;

use std::collections::HashMap;
use std::sync::Mutex;

use conductor_protocol::failure::ChildFailureResult;
use conductor_protocol::failure::FailureAction;
use conductor_protocol::failure::FailureInfo;
use conductor_protocol::feature::IsolationLevel;
use conductor_protocol::spawn::SpawnRequest;

pub use error::FaultError;

/// `strict ⇒ abort`, `lenient ⇒ handle` (§4.8 default policy).
pub fn default_action(isolation: IsolationLevel) -> FailureAction {
    match isolation {
        IsolationLevel::Strict => FailureAction::Abort,
        IsolationLevel::Lenient => FailureAction::Handle,
    }
}

struct FailureRecord {
    result: ChildFailureResult,
    original_request: SpawnRequest,
}

#[derive(Clone)]
pub struct SkippedChild {
    pub child_id: String,
    pub reason: String,
}

#[derive(Default)]
struct ParentState {
    failed: HashMap<String, FailureRecord>,
    skipped: Vec<SkippedChild>,
}

/// Records child failures per parent and mediates retry/skip/abort
/// decisions (§4.8).
#[derive(Default)]
pub struct FaultIsolationEngine {
    parents: Mutex<HashMap<String, ParentState>>,
}

impl FaultIsolationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a child failure, applying the isolation-derived default
    /// action unless the parent's failure callback supplies an override.
    pub fn record_failure(
        &self,
        parent_id: &str,
        child_id: &str,
        child_title: &str,
        isolation: IsolationLevel,
        failure: FailureInfo,
        original_request: SpawnRequest,
        override_action: Option<FailureAction>,
    ) -> ChildFailureResult {
        let action = override_action.unwrap_or_else(|| default_action(isolation));
        let result = ChildFailureResult {
            child_id: child_id.to_string(),
            child_title: child_title.to_string(),
            parent_id: parent_id.to_string(),
            failure,
            action,
            retry_params: None,
            skip_reason: None,
        };

        let mut parents = self.parents.lock().expect("fault lock poisoned");
        let state = parents.entry(parent_id.to_string()).or_default();
        state.failed.insert(child_id.to_string(), FailureRecord { result: result.clone(), original_request });

        tracing::warn!(parent_id, child_id, ?action, "child feature failed");
        result
    }

    /// `Retry(child_id, modified_params?)` (§4.8): removes the child from
    /// the failed list, bumps its retry count, and returns the spawn
    /// request to re-queue (the modified one if given, else the original).
    pub fn retry(&self, parent_id: &str, child_id: &str, modified_params: Option<SpawnRequest>) -> Result<SpawnRequest, FaultError> {
        let mut parents = self.parents.lock().expect("fault lock poisoned");
        let state = parents.entry(parent_id.to_string()).or_default();
        let mut record = state
            .failed
            .remove(child_id)
            .ok_or_else(|| error::NoSuchFailureSnafu { child_id: child_id.to_string() }.build())?;
        record.result.failure.retry_count += 1;

        tracing::info!(parent_id, child_id, retry_count = record.result.failure.retry_count, "retrying child feature");
        Ok(modified_params.unwrap_or(record.original_request))
    }

    /// `Skip(child_id, reason)` (§4.8): removes the child from the failed
    /// list and records it as skipped so the parent may proceed.
    pub fn skip(&self, parent_id: &str, child_id: &str, reason: impl Into<String>) {
        let reason = reason.into();
        let mut parents = self.parents.lock().expect("fault lock poisoned");
        let state = parents.entry(parent_id.to_string()).or_default();
        state.failed.remove(child_id);
        state.skipped.push(SkippedChild { child_id: child_id.to_string(), reason: reason.clone() });

        tracing::info!(parent_id, child_id, reason = %reason, "skipping child feature");
    }

    /// Reason text used when a strict parent aborts because of a failed
    /// child (§4.8 `Abort`: "child <id> failed").
    pub fn abort_reason(child_id: &str) -> String {
        format!("child {child_id} failed")
    }

    pub fn failed_children(&self, parent_id: &str) -> Vec<ChildFailureResult> {
        let parents = self.parents.lock().expect("fault lock poisoned");
        parents
            .get(parent_id)
            .map(|state| state.failed.values().map(|r| r.result.clone()).collect())
            .unwrap_or_default()
    }

    pub fn skipped_children(&self, parent_id: &str) -> Vec<SkippedChild> {
        let parents = self.parents.lock().expect("fault lock poisoned");
        parents.get(parent_id).map(|state| state.skipped.clone()).unwrap_or_default()
    }

    /// `GenerateFailureSummary(parent)` (§4.8): a Markdown block
    /// summarizing failed and skipped children, injected into the
    /// parent's next turn. Returns `None` if there is nothing to report.
    pub fn generate_failure_summary(&self, parent_id: &str) -> Option<String> {
        let failed = self.failed_children(parent_id);
        let skipped = self.skipped_children(parent_id);
        if failed.is_empty() && skipped.is_empty() {
            return None;
        }

        let mut out = String::from("## Child Feature Status\n");
        if !failed.is_empty() {
            out.push_str("\n### Failed Children\n");
            for child in &failed {
                out.push_str(&format!("- {} ({}): {}\n", child.child_title, child.child_id, child.failure.error_text));
            }
        }
        if !skipped.is_empty() {
            out.push_str("\n### Skipped Children\n");
            for child in &skipped {
                out.push_str(&format!("- {}: {}\n", child.child_id, child.reason));
            }
        }
        Some(out)
    }
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
