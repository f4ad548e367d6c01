use super::*;

#[test]
fn exactly_100_percent_is_not_over_budget() {
    let check = check_budget(100_000.0, 100_000.0);
    assert!(!check.over_budget);
    assert!(check.at_threshold);
}

#[test]
fn just_over_100_percent_is_over_budget() {
    let check = check_budget(100_000.1, 100_000.0);
    assert!(check.over_budget);
}

#[test]
fn ninety_percent_is_at_threshold() {
    let check = check_budget(95_000.0, 100_000.0);
    assert!(check.at_threshold);
    assert!(!check.over_budget);
}

#[test]
fn below_ninety_percent_is_not_at_threshold() {
    let check = check_budget(89_999.0, 100_000.0);
    assert!(!check.at_threshold);
}

#[test]
fn tracker_signals_threshold_then_overflow_edge_triggered() {
    let mut tracker = BudgetTracker::new();

    let (check, signal) = tracker.check(95_000.0, 100_000.0);
    assert!(check.at_threshold);
    assert_eq!(signal, Some(BudgetSignal::ThresholdReached));
    assert!(tracker.needs_acknowledgement());

    // Checking again at the same utilization doesn't re-signal.
    let (_, signal) = tracker.check(95_000.0, 100_000.0);
    assert_eq!(signal, None);

    tracker.acknowledge();
    assert!(!tracker.needs_acknowledgement());

    let (check, signal) = tracker.check(105_001.0, 100_000.0);
    assert!(check.over_budget);
    assert_eq!(signal, Some(BudgetSignal::OverBudget));
    assert!(tracker.is_paused());
    assert!(tracker.needs_acknowledgement());
}

#[test]
fn global_budget_scenario_from_spec() {
    let mut tracker = BudgetTracker::new();
    let (check, signal) = tracker.check(95_000.0, 100_000.0);
    assert!((check.percent - 0.95).abs() < 1e-9);
    assert!(check.at_threshold);
    assert!(!check.over_budget);
    assert_eq!(signal, Some(BudgetSignal::ThresholdReached));

    let (check, signal) = tracker.check(100_001.0, 100_000.0);
    assert!(check.over_budget);
    assert_eq!(signal, Some(BudgetSignal::OverBudget));
}
