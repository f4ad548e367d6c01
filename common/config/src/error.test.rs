use super::*;

#[test]
fn invalid_value_message_includes_field_and_detail() {
    let err = ConfigError::InvalidValue { field: "max_concurrency", detail: "must be > 0".to_string() };
    let message = err.to_string();
    assert!(message.contains("max_concurrency"));
    assert!(message.contains("must be > 0"));
}
