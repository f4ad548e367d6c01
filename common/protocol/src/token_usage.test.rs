use super::*;

#[test]
fn total_is_input_plus_output() {
    let mut u = TokenUsage::new();
    u.update(100, 50, 10, 5, 0.01);
    assert_eq!(u.total(), 150);
}

#[test]
fn update_is_additive_across_all_fields() {
    let mut u = TokenUsage::new();
    u.update(10, 20, 1, 2, 0.1);
    u.update(5, 5, 1, 1, 0.05);
    assert_eq!(u.input_tokens, 15);
    assert_eq!(u.output_tokens, 25);
    assert_eq!(u.cache_read_tokens, 2);
    assert_eq!(u.cache_write_tokens, 3);
    assert!((u.cost_usd - 0.15).abs() < 1e-9);
}

#[test]
fn add_folds_one_accumulator_into_another() {
    let mut a = TokenUsage::new();
    a.update(10, 10, 0, 0, 0.0);
    let mut b = TokenUsage::new();
    b.update(5, 5, 0, 0, 0.0);
    a.add(&b);
    assert_eq!(a.total(), 30);
}

#[test]
fn estimate_cost_uses_tier_rates_independent_of_reported_cost() {
    let mut u = TokenUsage::new();
    u.update(1_000_000, 1_000_000, 0, 0, 0.0);
    let rates = TierRates {
        input_per_million: 1.0,
        output_per_million: 2.0,
        cache_per_million: 0.5,
    };
    assert!((u.estimate_cost(rates) - 3.0).abs() < 1e-9);
}
