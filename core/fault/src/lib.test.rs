use conductor_protocol::failure::FailureInfo;
use conductor_protocol::feature::IsolationLevel;
use conductor_protocol::spawn::SpawnRequest;

use super::*;

fn request(title: &str) -> SpawnRequest {
    SpawnRequest { title: title.to_string(), tasks: vec![], model: None, description: None, max_depth: None }
}

#[test]
fn strict_isolation_defaults_to_abort() {
    assert_eq!(default_action(IsolationLevel::Strict), FailureAction::Abort);
}

#[test]
fn lenient_isolation_defaults_to_handle() {
    assert_eq!(default_action(IsolationLevel::Lenient), FailureAction::Handle);
}

#[test]
fn record_failure_applies_default_policy_when_no_override() {
    let engine = FaultIsolationEngine::new();
    let failure = FailureInfo::new("execution_error", "boom", true);
    let result = engine.record_failure("parent", "child-1", "Child One", IsolationLevel::Lenient, failure, request("Child One"), None);
    assert_eq!(result.action, FailureAction::Handle);
    assert_eq!(engine.failed_children("parent").len(), 1);
}

#[test]
fn record_failure_honors_parent_callback_override() {
    let engine = FaultIsolationEngine::new();
    let failure = FailureInfo::new("execution_error", "boom", true);
    let result = engine.record_failure(
        "parent",
        "child-1",
        "Child One",
        IsolationLevel::Lenient,
        failure,
        request("Child One"),
        Some(FailureAction::Abort),
    );
    assert_eq!(result.action, FailureAction::Abort);
}

#[test]
fn retry_removes_from_failed_list_and_bumps_retry_count() {
    let engine = FaultIsolationEngine::new();
    let failure = FailureInfo::new("execution_error", "boom", true);
    engine.record_failure("parent", "child-1", "Child One", IsolationLevel::Lenient, failure, request("Child One"), None);

    let requeued = engine.retry("parent", "child-1", None).unwrap();
    assert_eq!(requeued.title, "Child One");
    assert!(engine.failed_children("parent").is_empty());
}

#[test]
fn retry_uses_modified_params_when_given() {
    let engine = FaultIsolationEngine::new();
    let failure = FailureInfo::new("execution_error", "boom", true);
    engine.record_failure("parent", "child-1", "Child One", IsolationLevel::Lenient, failure, request("Child One"), None);

    let requeued = engine.retry("parent", "child-1", Some(request("Child One (retry 2)"))).unwrap();
    assert_eq!(requeued.title, "Child One (retry 2)");
}

#[test]
fn retry_unknown_child_is_an_error() {
    let engine = FaultIsolationEngine::new();
    let err = engine.retry("parent", "nope", None).unwrap_err();
    assert_eq!(err, FaultError::NoSuchFailure { child_id: "nope".to_string() });
}

#[test]
fn skip_moves_child_from_failed_to_skipped() {
    let engine = FaultIsolationEngine::new();
    let failure = FailureInfo::new("execution_error", "boom", true);
    engine.record_failure("parent", "child-1", "Child One", IsolationLevel::Lenient, failure, request("Child One"), None);

    engine.skip("parent", "child-1", "not worth retrying");
    assert!(engine.failed_children("parent").is_empty());
    let skipped = engine.skipped_children("parent");
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].reason, "not worth retrying");
}

#[test]
fn abort_reason_matches_spec_wording() {
    assert_eq!(FaultIsolationEngine::abort_reason("child-1"), "child child-1 failed");
}

#[test]
fn failure_summary_is_none_when_nothing_to_report() {
    let engine = FaultIsolationEngine::new();
    assert!(engine.generate_failure_summary("parent").is_none());
}

#[test]
fn failure_summary_includes_both_sections() {
    let engine = FaultIsolationEngine::new();
    let failure = FailureInfo::new("execution_error", "tests failed", true);
    engine.record_failure("parent", "child-1", "Child One", IsolationLevel::Lenient, failure, request("Child One"), None);
    engine.skip("parent", "child-2", "duplicate of child-1");

    let summary = engine.generate_failure_summary("parent").unwrap();
    assert!(summary.starts_with("## Child Feature Status"));
    assert!(summary.contains("### Failed Children"));
    assert!(summary.contains("Child One"));
    assert!(summary.contains("### Skipped Children"));
    assert!(summary.contains("duplicate of child-1"));
}
