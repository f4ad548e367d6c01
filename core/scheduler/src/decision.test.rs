use pretty_assertions::assert_eq;

use super::*;

fn state(id: &str, status: FeatureStatus, can_retry: bool, deps: &[&str]) -> DispatchState {
    DispatchState {
        id: id.to_string(),
        status,
        can_retry,
        dependency_ids: deps.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn ready_feature_with_no_dependencies_is_chosen_first() {
    let roots = vec![state("a", FeatureStatus::Pending, true, &[])];
    assert_eq!(next_ready(&roots), Some("a"));
}

#[test]
fn pending_feature_blocked_by_incomplete_dependency_is_not_ready() {
    let roots = vec![state("a", FeatureStatus::Running, true, &[]), state("b", FeatureStatus::Pending, true, &["a"])];
    assert_eq!(next_ready(&roots), None);
}

#[test]
fn pending_feature_unblocks_once_dependency_completes() {
    let roots = vec![state("a", FeatureStatus::Completed, true, &[]), state("b", FeatureStatus::Pending, true, &["a"])];
    assert_eq!(next_ready(&roots), Some("b"));
}

#[test]
fn skipped_dependency_also_satisfies() {
    let roots = vec![state("a", FeatureStatus::Skipped, true, &[]), state("b", FeatureStatus::Pending, true, &["a"])];
    assert_eq!(next_ready(&roots), Some("b"));
}

#[test]
fn dangling_dependency_id_is_treated_as_satisfied() {
    let roots = vec![state("b", FeatureStatus::Pending, true, &["ghost"])];
    assert_eq!(next_ready(&roots), Some("b"));
}

#[test]
fn retryable_failed_feature_is_found() {
    let roots = vec![state("a", FeatureStatus::Completed, true, &[]), state("b", FeatureStatus::Failed, true, &[])];
    assert_eq!(next_retryable_failed(&roots), Some("b"));
}

#[test]
fn exhausted_failed_feature_is_not_retried() {
    let roots = vec![state("a", FeatureStatus::Failed, false, &[])];
    assert_eq!(next_retryable_failed(&roots), None);
}

#[test]
fn auto_mode_is_exhausted_once_nothing_is_runnable() {
    let roots = vec![state("a", FeatureStatus::Completed, true, &[]), state("b", FeatureStatus::Failed, false, &[])];
    assert!(is_exhausted(&roots, 0));
    assert!(has_unresolved_failures(&roots));
}

#[test]
fn auto_mode_is_not_exhausted_while_something_is_running() {
    let roots = vec![state("a", FeatureStatus::Running, true, &[])];
    assert!(!is_exhausted(&roots, 1));
}

#[test]
fn clean_run_has_no_unresolved_failures() {
    let roots = vec![state("a", FeatureStatus::Completed, true, &[])];
    assert!(!has_unresolved_failures(&roots));
}
