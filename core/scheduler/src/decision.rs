//! Pure dispatch-order decisions (§4.10 "Tick"), factored out of
//! [`crate::Scheduler`] so the ordering/retry/termination rules can be
//! exercised without a live tree, process manager, or budget tracker.

use conductor_protocol::feature::FeatureStatus;

/// One root feature's state as far as dispatch ordering cares.
#[derive(Debug, Clone)]
pub struct DispatchState {
    pub id: String,
    pub status: FeatureStatus,
    pub can_retry: bool,
    pub dependency_ids: Vec<String>,
}

/// A dependency is satisfied if it doesn't appear in `roots` at all (§8 "a
/// dangling dependency is treated as already satisfied"), or if its status
/// is `completed` or `skipped`. A `failed` or `stopped` dependency that has
/// exhausted retries blocks forever, matching it never becoming ready.
fn dependencies_satisfied(dependency_ids: &[String], roots: &[DispatchState]) -> bool {
    dependency_ids.iter().all(|dep_id| {
        roots.iter().find(|r| &r.id == dep_id).is_none_or(|dep| {
            matches!(dep.status, FeatureStatus::Completed | FeatureStatus::Skipped)
        })
    })
}

/// Returns the id of the first root feature in plan order that is `pending`
/// with all dependencies satisfied (§4.10 step 1, "Start ready features
/// (dependencies satisfied) up to the concurrency cap, in PRD order").
pub fn next_ready<'a>(roots: &'a [DispatchState]) -> Option<&'a str> {
    roots
        .iter()
        .find(|r| r.status == FeatureStatus::Pending && dependencies_satisfied(&r.dependency_ids, roots))
        .map(|r| r.id.as_str())
}

/// Returns the id of the first root feature in plan order that is `failed`
/// and still has retries remaining (§4.10 step 2, "Retry failed features
/// under `max_retries`").
pub fn next_retryable_failed<'a>(roots: &'a [DispatchState]) -> Option<&'a str> {
    roots.iter().find(|r| r.status == FeatureStatus::Failed && r.can_retry).map(|r| r.id.as_str())
}

/// Auto mode ends once nothing is running, nothing is ready, and nothing is
/// retryable (§4.10 step 4, "End auto mode when the running count is zero
/// and no further feature can start").
pub fn is_exhausted(roots: &[DispatchState], running_count: usize) -> bool {
    running_count == 0 && next_ready(roots).is_none() && next_retryable_failed(roots).is_none()
}

/// Whether any root is left in a non-terminal-success state once
/// [`is_exhausted`] is true — distinguishes a clean run from one that ended
/// with permanently failed features (§4.10 "auto mode's terminal report").
pub fn has_unresolved_failures(roots: &[DispatchState]) -> bool {
    roots.iter().any(|r| matches!(r.status, FeatureStatus::Failed | FeatureStatus::Stopped))
}

#[cfg(test)]
#[path = "decision.test.rs"]
mod tests;
