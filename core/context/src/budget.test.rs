use super::*;

#[test]
fn root_gets_full_base_budget() {
    assert_eq!(budget_for_depth(100_000, 0), 100_000);
}

#[test]
fn budget_halves_at_each_depth() {
    assert_eq!(budget_for_depth(100_000, 1), 50_000);
    assert_eq!(budget_for_depth(100_000, 3), 25_000);
}

#[test]
fn never_drops_below_minimum() {
    assert_eq!(budget_for_depth(10_000, 10), MIN_CONTEXT_BUDGET);
    assert_eq!(budget_for_depth(1_000, 0), MIN_CONTEXT_BUDGET);
}

#[test]
fn negative_depth_treated_as_zero() {
    assert_eq!(budget_for_depth(100_000, -5), budget_for_depth(100_000, 0));
}

#[test]
fn siblings_at_same_depth_get_equal_shares_of_base() {
    // Both computed from the same base, not from each other's allocation.
    let a = budget_for_depth(90_000, 2);
    let b = budget_for_depth(90_000, 2);
    assert_eq!(a, b);
    assert_eq!(a, 30_000);
}

#[test]
fn summarization_threshold_boundary() {
    assert!(needs_summarization(800, 1000));
    assert!(!needs_summarization(799, 1000));
}

#[test]
fn over_budget_boundary_is_strict() {
    assert!(!is_over_budget(1000, 1000));
    assert!(is_over_budget(1001, 1000));
}
