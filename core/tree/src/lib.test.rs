use chrono::Utc;
use conductor_protocol::feature::FeatureStatus;
use conductor_protocol::spawn::SpawnRequest;

use super::*;

fn running_root(tree: &FeatureTree, title: &str, base_budget: i64) -> Feature {
    let root = tree.register(title, vec![], base_budget);
    tree.update(&root.id, |f| f.start(Utc::now())).unwrap();
    tree.get(&root.id).unwrap()
}

fn spawn_request(title: &str) -> SpawnRequest {
    SpawnRequest {
        title: title.to_string(),
        tasks: vec![],
        model: None,
        description: None,
        max_depth: None,
    }
}

#[test]
fn register_then_lookup() {
    let tree = FeatureTree::new();
    let feature = tree.register("Add auth", vec![], 100_000);
    assert_eq!(tree.get(&feature.id).unwrap().title, "Add auth");
}

#[test]
fn registering_same_title_twice_is_structurally_a_noop() {
    let tree = FeatureTree::new();
    let first = tree.register("Add auth", vec![], 100_000);
    let second = tree.register("Add auth", vec![], 100_000);
    assert_eq!(first.id, second.id);
    assert_eq!(tree.children_of(&first.id).len(), 0);
}

#[test]
fn spawn_rejects_non_running_parent() {
    let tree = FeatureTree::new();
    let root = tree.register("Root", vec![], 100_000);
    let err = tree.spawn(&root.id, &spawn_request("Child")).unwrap_err();
    assert_eq!(err, error::ParentNotRunningSnafu { id: root.id.clone() }.build());
}

#[test]
fn spawn_rejects_empty_title() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 100_000);
    let err = tree.spawn(&root.id, &spawn_request("")).unwrap_err();
    assert!(matches!(err, TreeError::InvalidSpawnData { .. }));
}

#[test]
fn spawn_succeeds_and_assigns_depth_and_budget() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 90_000);
    let child = tree.spawn(&root.id, &spawn_request("Child")).unwrap();
    assert_eq!(child.depth, 1);
    assert_eq!(child.context_budget, 45_000);
    assert_eq!(child.parent_id.as_deref(), Some(root.id.as_str()));
}

#[test]
fn siblings_at_same_depth_get_equal_budgets() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 90_000);
    let a = tree.spawn(&root.id, &spawn_request("A")).unwrap();
    let b = tree.spawn(&root.id, &spawn_request("B")).unwrap();
    assert_eq!(a.context_budget, b.context_budget);
}

#[test]
fn spawn_at_max_depth_minus_one_succeeds_at_max_depth() {
    let tree = FeatureTree::new();
    let mut root = tree.register("Root", vec![], 90_000);
    tree.update(&root.id, |f| {
        f.max_depth = 2;
        f.start(Utc::now());
    })
    .unwrap();
    root = tree.get(&root.id).unwrap();
    assert_eq!(root.depth, 0);

    let child = tree.spawn(&root.id, &spawn_request("Child")).unwrap();
    tree.update(&child.id, |f| f.start(Utc::now())).unwrap();
    assert_eq!(child.depth, 1);

    let grandchild = tree.spawn(&child.id, &spawn_request("Grandchild")).unwrap();
    assert_eq!(grandchild.depth, 2);
    assert_eq!(grandchild.max_depth, 2);
}

#[test]
fn spawn_rejected_once_depth_equals_max_depth() {
    let tree = FeatureTree::new();
    let mut root = tree.register("Root", vec![], 90_000);
    tree.update(&root.id, |f| {
        f.max_depth = 2;
        f.start(Utc::now());
    })
    .unwrap();
    root = tree.get(&root.id).unwrap();

    let child = tree.spawn(&root.id, &spawn_request("Child")).unwrap();
    tree.update(&child.id, |f| f.start(Utc::now())).unwrap();
    let grandchild = tree.spawn(&child.id, &spawn_request("Grandchild")).unwrap();
    tree.update(&grandchild.id, |f| f.start(Utc::now())).unwrap();

    let err = tree.spawn(&grandchild.id, &spawn_request("GreatGrandchild")).unwrap_err();
    assert_eq!(err, error::MaxDepthExceededSnafu { id: grandchild.id.clone() }.build());
}

#[test]
fn remove_subtree_cascades_to_descendants() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 90_000);
    let child = tree.spawn(&root.id, &spawn_request("Child")).unwrap();
    tree.update(&child.id, |f| f.start(Utc::now())).unwrap();
    let grandchild = tree.spawn(&child.id, &spawn_request("Grandchild")).unwrap();

    tree.remove_subtree(&child.id);

    assert!(tree.get(&child.id).is_none());
    assert!(tree.get(&grandchild.id).is_none());
    assert!(tree.get(&root.id).is_some());
}

#[test]
fn total_token_usage_is_post_order_sum() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 90_000);
    let child = tree.spawn(&root.id, &spawn_request("Child")).unwrap();

    tree.record_usage(&root.id, 10, 5, 0, 0, 0.0);
    tree.record_usage(&child.id, 20, 10, 0, 0, 0.0);

    let total = tree.total_token_usage(&root.id);
    assert_eq!(total.input_tokens, 30);
    assert_eq!(total.output_tokens, 15);
}

#[test]
fn ingest_detects_spawn_request() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 90_000);

    let event = StreamEvent::ToolUse {
        tool: "ralph_spawn_feature".to_string(),
        input: serde_json::json!({ "title": "Child feature", "tasks": ["do a thing"] }),
    };
    let result = tree.ingest(&root.id, &event, Utc::now()).unwrap();
    let request = result.unwrap();
    assert_eq!(request.title, "Child feature");
    assert_eq!(request.tasks, vec!["do a thing".to_string()]);
}

#[test]
fn ingest_rejects_spawn_past_max_depth() {
    let tree = FeatureTree::new();
    let mut root = tree.register("Root", vec![], 90_000);
    tree.update(&root.id, |f| {
        f.max_depth = 0;
        f.start(Utc::now());
    })
    .unwrap();
    root = tree.get(&root.id).unwrap();
    assert_eq!(root.depth, root.max_depth);

    let event = StreamEvent::ToolUse {
        tool: "ralph_spawn_feature".to_string(),
        input: serde_json::json!({ "title": "Child" }),
    };
    let err = tree.ingest(&root.id, &event, Utc::now()).unwrap_err();
    assert!(matches!(err, TreeError::MaxDepthExceeded { .. }));
}

#[test]
fn ingest_rejects_invalid_spawn_payload() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 90_000);
    let event = StreamEvent::ToolUse {
        tool: "ralph_spawn_feature".to_string(),
        input: serde_json::json!({ "tasks": ["x"] }),
    };
    let err = tree.ingest(&root.id, &event, Utc::now()).unwrap_err();
    assert!(matches!(err, TreeError::InvalidSpawnData { .. }));
}

#[test]
fn ingest_records_non_spawn_action() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 90_000);
    let event = StreamEvent::ToolUse {
        tool: "Bash".to_string(),
        input: serde_json::json!({ "command": "cargo test" }),
    };
    tree.ingest(&root.id, &event, Utc::now()).unwrap();
    let actions = tree.all_actions(&root.id);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].name, "Bash");
}

#[test]
fn complete_transitions_to_terminal_and_snapshots_usage() {
    let tree = FeatureTree::new();
    let root = running_root(&tree, "Root", 90_000);
    tree.record_usage(&root.id, 10, 5, 0, 0, 0.0);

    let result = tree.complete(&root.id, FeatureStatus::Completed, "all good", None, Utc::now()).unwrap();
    assert_eq!(result.status, FeatureStatus::Completed);
    assert_eq!(result.token_usage_snapshot.total(), 15);
    assert_eq!(tree.get(&root.id).unwrap().status, FeatureStatus::Completed);
}
