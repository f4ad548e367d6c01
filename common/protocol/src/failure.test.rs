use super::*;

#[test]
fn can_retry_requires_recoverable_and_under_max() {
    let mut f = FailureInfo::new("execution_error", "boom", true);
    f.max_retries = 2;
    assert!(f.can_retry());
    f.retry_count = 2;
    assert!(!f.can_retry());
}

#[test]
fn unrecoverable_failure_cannot_retry_even_under_max() {
    let f = FailureInfo::new("execution_error", "boom", false);
    assert!(!f.can_retry());
}
