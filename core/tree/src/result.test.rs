use conductor_protocol::feature::FeatureStatus;
use conductor_protocol::token_usage::TokenUsage;

use super::*;

#[test]
fn omits_tokens_and_error_when_absent() {
    let result = SpawnResult {
        id: "abc".to_string(),
        title: "Leaf".to_string(),
        status: FeatureStatus::Completed,
        summary: "done".to_string(),
        token_usage_snapshot: TokenUsage::new(),
        error: None,
    };
    let json = generate_result_context(&result);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let inner = &value["sub_feature_completed"];
    assert_eq!(inner["id"], "abc");
    assert!(inner.get("tokens_used").is_none());
    assert!(inner.get("error").is_none());
}

#[test]
fn includes_tokens_and_error_when_present() {
    let mut usage = TokenUsage::new();
    usage.update(100, 50, 0, 0, 0.0);
    let result = SpawnResult {
        id: "abc".to_string(),
        title: "Leaf".to_string(),
        status: FeatureStatus::Failed,
        summary: "blew up".to_string(),
        token_usage_snapshot: usage,
        error: Some("panic".to_string()),
    };
    let json = generate_result_context(&result);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let inner = &value["sub_feature_completed"];
    assert_eq!(inner["tokens_used"], 150);
    assert_eq!(inner["error"], "panic");
}
