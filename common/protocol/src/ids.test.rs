use super::*;

#[test]
fn root_id_is_stable_and_fixed_length() {
    let a = root_feature_id("Add login form");
    let b = root_feature_id("Add login form");
    assert_eq!(a, b);
    assert_eq!(a.len(), FEATURE_ID_LEN);
}

#[test]
fn different_titles_hash_differently() {
    let a = root_feature_id("Add login form");
    let b = root_feature_id("Add logout form");
    assert_ne!(a, b);
}

#[test]
fn child_id_depends_on_parent() {
    let a = child_feature_id("parent1", "same title");
    let b = child_feature_id("parent2", "same title");
    assert_ne!(a, b);
}

#[test]
fn child_id_is_deterministic() {
    let a = child_feature_id("parent1", "title");
    let b = child_feature_id("parent1", "title");
    assert_eq!(a, b);
}
