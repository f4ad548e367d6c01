use super::*;

#[test]
fn architectural_signal_detected() {
    assert!(is_architectural("we need to reconsider the database schema"));
    assert!(!is_architectural("fixed a typo"));
}

#[test]
fn debugging_signal_detected() {
    assert!(is_debugging("hit a segfault in the allocator"));
    assert!(is_debugging("panic: index out of bounds"));
}

#[test]
fn complex_debugging_requires_specific_patterns() {
    assert!(is_complex_debugging("classic race condition between threads"));
    assert!(!is_complex_debugging("simple debug session"));
}

#[test]
fn build_or_test_failure_detects_both_families() {
    assert!(is_build_or_test_failure("syntax error on line 4"));
    assert!(is_build_or_test_failure("--- FAIL: TestFoo"));
    assert!(is_build_or_test_failure("Expected: 1, Actual: 2"));
    assert!(!is_build_or_test_failure("all good here"));
}

#[test]
fn keyword_counting_is_case_insensitive() {
    let keywords = vec!["Simple".to_string(), "Just running tests".to_string()];
    let text = "simple test formatting task. Just running tests and linting.";
    assert_eq!(count_keyword_matches(text, &keywords), 2);
}
