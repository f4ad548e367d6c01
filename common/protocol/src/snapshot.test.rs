use pretty_assertions::assert_eq;

use super::*;
use crate::feature::Task;

fn sample_feature() -> Feature {
    let tasks = vec![Task { id: "t0".to_string(), description: "write the thing".to_string(), completed: true }];
    let mut feature = Feature::new_root("Add login form", tasks);
    feature.last_error = Some("boom".to_string());
    feature.skip_reason = Some("not needed".to_string());
    feature
}

/// §8 "Every persisted snapshot round-trips: load(serialize(state)) =
/// state" — the single most important property of C11.
#[test]
fn snapshot_round_trips_through_json() {
    let mut snapshot = ProgressSnapshot::new(Some("deadbeef".to_string()), SnapshotConfig { max_retries: 3, max_concurrency: 4 });
    let feature = sample_feature();
    let mut state = FeatureState::from(feature);
    state.test_results_summary = Some("3 passed, 0 failed".to_string());
    state.failed_children = Vec::new();
    snapshot.upsert_feature(state, snapshot.started_at);

    let serialized = serde_json::to_string(&snapshot).expect("snapshot serializes");
    let reloaded: ProgressSnapshot = serde_json::from_str(&serialized).expect("snapshot deserializes");

    assert_eq!(reloaded.version, snapshot.version);
    assert_eq!(reloaded.prd_hash, snapshot.prd_hash);
    assert_eq!(reloaded.config.max_retries, snapshot.config.max_retries);
    assert_eq!(reloaded.features.len(), snapshot.features.len());

    let (id, original_state) = snapshot.features.iter().next().expect("one feature");
    let reloaded_state = reloaded.features.get(id).expect("feature id preserved");
    assert_eq!(reloaded_state.feature.title, original_state.feature.title);
    assert_eq!(reloaded_state.feature.last_error, original_state.feature.last_error);
    assert_eq!(reloaded_state.feature.skip_reason, original_state.feature.skip_reason);
    assert_eq!(reloaded_state.test_results_summary, original_state.test_results_summary);
    assert_eq!(reloaded_state.skipped, original_state.skipped);
}

/// The flattened `Feature` fields must appear exactly once each in the
/// serialized document — no outer `FeatureState` field may shadow or
/// duplicate one already owned by `Feature`.
#[test]
fn flattened_feature_fields_are_not_duplicated() {
    let state = FeatureState::from(sample_feature());
    let serialized = serde_json::to_string(&state).expect("feature state serializes");

    for key in ["last_error", "skip_reason", "adjustments", "original_model", "current_model", "model_switches", "isolation_level"] {
        let needle = format!("\"{key}\":");
        let occurrences = serialized.matches(&needle).count();
        assert_eq!(occurrences, 1, "key {key} appeared {occurrences} times in {serialized}");
    }
}

#[test]
fn upsert_feature_indexes_by_feature_id_and_bumps_updated_at() {
    let mut snapshot = ProgressSnapshot::new(None, SnapshotConfig::default());
    let feature = sample_feature();
    let id = feature.id.clone();
    let later = snapshot.started_at + chrono::Duration::seconds(5);

    snapshot.upsert_feature(FeatureState::from(feature), later);

    assert!(snapshot.features.contains_key(&id));
    assert_eq!(snapshot.updated_at, later);
}
