//! `SpawnResult` (§4.7) — the outcome handed back when a feature completes,
//! and its serialized form injected into the parent's next prompt turn.

use conductor_protocol::feature::FeatureStatus;
use conductor_protocol::token_usage::TokenUsage;
use serde::Serialize;
use serde_json::json;

/// Outcome of a completed feature, returned by
/// [`crate::FeatureTree::complete`] (§4.7).
#[derive(Debug, Clone, Serialize)]
pub struct SpawnResult {
    pub id: String,
    pub title: String,
    pub status: FeatureStatus,
    pub summary: String,
    pub token_usage_snapshot: TokenUsage,
    pub error: Option<String>,
}

/// Serializes a `SpawnResult` as a JSON object rooted at
/// `sub_feature_completed`, containing id, title, status, summary, and
/// (when present) tokens_used and error (§4.7).
pub fn generate_result_context(result: &SpawnResult) -> String {
    let mut inner = json!({
        "id": result.id,
        "title": result.title,
        "status": result.status,
        "summary": result.summary,
    });
    if result.token_usage_snapshot.total() > 0 {
        inner["tokens_used"] = json!(result.token_usage_snapshot.total());
    }
    if let Some(error) = &result.error {
        inner["error"] = json!(error);
    }

    let root = json!({ "sub_feature_completed": inner });
    serde_json::to_string_pretty(&root).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
#[path = "result.test.rs"]
mod tests;
