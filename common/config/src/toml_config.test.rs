use super::*;
use crate::types::Config;

#[test]
fn sparse_overlay_only_touches_present_fields() {
    let toml = TomlConfig::parse(
        r#"
        max_concurrency = 8
        global_token_budget = "100k"

        [model_tiers]
        premium = "opus-4"
        "#,
    )
    .unwrap();

    let mut config = Config::default();
    let default_worker_command = config.worker_command.clone();
    toml.apply_to(&mut config).unwrap();

    assert_eq!(config.max_concurrency, 8);
    assert_eq!(config.global_token_budget, Some(100_000));
    assert_eq!(config.model_tiers.premium, "opus-4");
    // Untouched fields keep their prior value.
    assert_eq!(config.worker_command, default_worker_command);
    assert_eq!(config.model_tiers.cheap, "haiku");
}

#[test]
fn missing_file_returns_none_not_an_error() {
    let result = TomlConfig::load_from_path(Path::new("/nonexistent/conductor.toml")).unwrap();
    assert!(result.is_none());
}

#[test]
fn invalid_budget_string_is_rejected() {
    let toml = TomlConfig::parse(r#"global_token_budget = "not-a-budget""#).unwrap();
    let mut config = Config::default();
    assert!(toml.apply_to(&mut config).is_err());
}
