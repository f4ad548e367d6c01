use std::collections::HashMap;

use super::*;
use crate::types::Config;

#[test]
fn applies_recognized_variables() {
    let mut vars = HashMap::new();
    vars.insert(MAX_CONCURRENCY.to_string(), "10".to_string());
    vars.insert(GLOBAL_TOKEN_BUDGET.to_string(), "1.5M".to_string());

    let mut config = Config::default();
    apply_env(&mut config, &vars).unwrap();

    assert_eq!(config.max_concurrency, 10);
    assert_eq!(config.global_token_budget, Some(1_500_000));
}

#[test]
fn rejects_unparsable_integer() {
    let mut vars = HashMap::new();
    vars.insert(MAX_RETRIES.to_string(), "not-a-number".to_string());

    let mut config = Config::default();
    assert!(apply_env(&mut config, &vars).is_err());
}

#[test]
fn unset_variables_leave_config_untouched() {
    let mut config = Config::default();
    let before = config.clone();
    apply_env(&mut config, &HashMap::new()).unwrap();
    assert_eq!(config, before);
}
