use super::*;

#[test]
fn detects_nonzero_failed_count() {
    assert!(looks_like_test_failure("test result: FAILED. 3 passed; 2 failed; 0 ignored"));
    assert!(looks_like_test_failure("12 tests, 1 failed"));
}

#[test]
fn zero_failed_count_is_not_a_failure() {
    assert!(!looks_like_test_failure("test result: ok. 8 passed; 0 failed; 0 ignored"));
}

#[test]
fn output_without_failure_markers_is_not_a_failure() {
    assert!(!looks_like_test_failure("build finished successfully"));
}
