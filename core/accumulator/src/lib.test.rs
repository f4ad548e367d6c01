use conductor_protocol::token_usage::TierRates;

use super::*;

#[test]
fn update_is_additive_across_all_fields() {
    let accumulator = Accumulator::new();
    accumulator.update(10, 5, 2, 1, 0.01);
    accumulator.update(3, 2, 1, 0, 0.02);

    let snapshot = accumulator.snapshot();
    assert_eq!(snapshot.input_tokens, 13);
    assert_eq!(snapshot.output_tokens, 7);
    assert_eq!(snapshot.cache_read_tokens, 3);
    assert_eq!(snapshot.cache_write_tokens, 1);
    assert!((snapshot.cost_usd - 0.03).abs() < 1e-9);
    assert_eq!(accumulator.total(), 20);
}

#[test]
fn add_folds_other_accumulator_in() {
    let parent = Accumulator::new();
    parent.update(100, 50, 0, 0, 1.0);

    let child = Accumulator::new();
    child.update(10, 5, 0, 0, 0.1);

    parent.add(&child);

    assert_eq!(parent.snapshot().input_tokens, 110);
    assert_eq!(parent.snapshot().output_tokens, 55);
}

#[test]
fn snapshot_is_a_copy_not_a_live_view() {
    let accumulator = Accumulator::new();
    accumulator.update(1, 1, 0, 0, 0.0);
    let snapshot = accumulator.snapshot();
    accumulator.update(100, 100, 0, 0, 0.0);
    assert_eq!(snapshot.input_tokens, 1);
}

#[test]
fn aggregate_sums_a_tree_of_accumulators() {
    let root = Accumulator::new();
    root.update(10, 10, 0, 0, 0.0);
    let child_a = Accumulator::new();
    child_a.update(5, 5, 0, 0, 0.0);
    let child_b = Accumulator::new();
    child_b.update(1, 1, 0, 0, 0.0);

    let total = aggregate([&root, &child_a, &child_b]);
    assert_eq!(total.total(), 32);
}

#[test]
fn estimated_cost_uses_tier_rates_independent_of_reported_cost() {
    let accumulator = Accumulator::new();
    accumulator.update(1_000_000, 1_000_000, 0, 0, 0.0);
    let rates = TierRates {
        input_per_million: 3.0,
        output_per_million: 15.0,
        cache_per_million: 0.3,
    };
    assert!((accumulator.estimated_cost(rates) - 18.0).abs() < 1e-9);
}
