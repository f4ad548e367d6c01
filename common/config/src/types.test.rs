use super::*;

#[test]
fn default_config_matches_protocol_constants() {
    let config = Config::default();
    assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(config.max_adjustments, DEFAULT_MAX_ADJUSTMENTS);
    assert!(config.base_context_budget >= MIN_CONTEXT_BUDGET);
}

#[test]
fn default_model_tiers_are_the_three_well_known_names() {
    let tiers = ModelTierNames::default();
    assert_eq!(tiers.cheap, "haiku");
    assert_eq!(tiers.mid, "sonnet");
    assert_eq!(tiers.premium, "opus");
}
