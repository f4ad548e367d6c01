use conductor_protocol::feature::Feature;
use conductor_protocol::snapshot::FeatureState;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use super::*;

fn config() -> SnapshotConfig {
    SnapshotConfig::default()
}

#[test]
fn starts_empty_when_neither_path_exists() {
    let dir = tempdir().unwrap();
    let store = ProgressStore::load_or_init(dir.path().join("progress.json"), dir.path().join("progress.md"), None, config()).unwrap();
    assert!(store.snapshot().features.is_empty());
}

#[test]
fn update_persists_to_the_primary_path_and_reloads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let store = ProgressStore::load_or_init(&path, dir.path().join("progress.md"), None, config()).unwrap();

    store
        .update(|snapshot| {
            let feature = Feature::new_root("demo", Vec::new());
            snapshot.upsert_feature(FeatureState::from(feature), Utc::now());
        })
        .unwrap();

    assert!(path.exists());
    let reloaded = ProgressStore::load_or_init(&path, dir.path().join("progress.md"), None, config()).unwrap();
    assert_eq!(reloaded.snapshot().features.len(), 1);
}

#[test]
fn falls_back_to_legacy_path_when_primary_is_missing() {
    let dir = tempdir().unwrap();
    let primary = dir.path().join("progress.json");
    let legacy = dir.path().join("progress.md");

    let seed = ProgressStore::load_or_init(&legacy, dir.path().join("unused.md"), None, config()).unwrap();
    seed.update(|snapshot| {
        let feature = Feature::new_root("legacy-feature", Vec::new());
        snapshot.upsert_feature(FeatureState::from(feature), Utc::now());
    })
    .unwrap();

    let store = ProgressStore::load_or_init(&primary, &legacy, None, config()).unwrap();
    assert_eq!(store.snapshot().features.len(), 1);
}

#[test]
fn no_tmp_file_left_behind_after_a_successful_update() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let store = ProgressStore::load_or_init(&path, dir.path().join("progress.md"), None, config()).unwrap();
    store.update(|_| {}).unwrap();
    assert!(!path.with_extension("json.tmp").exists());
}
