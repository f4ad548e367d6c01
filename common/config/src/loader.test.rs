use super::*;

#[test]
fn loads_built_in_defaults_when_no_file_present() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_from_dir(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn toml_overlay_takes_priority_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "max_concurrency = 16\n").unwrap();

    let config = load_from_dir(dir.path()).unwrap();
    assert_eq!(config.max_concurrency, 16);
}

#[test]
fn malformed_toml_surfaces_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "max_concurrency = [[[").unwrap();

    let result = load_from_dir(dir.path());
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}
