use std::sync::Arc;

use conductor_model_selector::Selector;
use conductor_model_selector::SelectorConfig;
use conductor_protocol::feature::FeatureStatus;
use conductor_protocol::feature::ModelTier;
use conductor_tree::FeatureTree;

use super::*;

fn running_tree(id: &str) -> Arc<FeatureTree> {
    let tree = Arc::new(FeatureTree::new());
    let feature = tree.register(id, Vec::new(), 100_000);
    tree.update(&feature.id, |f| f.status = FeatureStatus::Running).unwrap();
    tree
}

fn request(feature_id: &str) -> StartRequest {
    StartRequest { feature_id: feature_id.to_string(), cwd: std::env::temp_dir(), prompt: "do the thing".to_string(), model: None }
}

#[tokio::test]
async fn refuses_to_start_past_max_concurrency() {
    let (manager, _rx) = ProcessManager::new("sleep", 1);
    let selector = Selector::new(ModelTier::Cheap, SelectorConfig::default());

    manager.start(request("f1"), running_tree("f1"), selector.clone()).unwrap();
    let result = manager.start(request("f2"), running_tree("f2"), selector);
    assert!(matches!(result, Err(ProcessError::MaxConcurrencyReached { limit: 1 })));

    manager.stop_all();
}

#[tokio::test]
async fn refuses_duplicate_instance_for_same_feature() {
    let (manager, _rx) = ProcessManager::new("sleep", 4);
    let selector = Selector::new(ModelTier::Cheap, SelectorConfig::default());

    manager.start(request("dup"), running_tree("dup"), selector.clone()).unwrap();
    let result = manager.start(request("dup"), running_tree("dup"), selector);
    assert!(matches!(result, Err(ProcessError::AlreadyRunning { .. })));

    manager.stop_all();
}

#[tokio::test]
async fn stop_on_unknown_feature_is_an_error() {
    let (manager, _rx) = ProcessManager::new("sleep", 4);
    assert!(matches!(manager.stop("missing"), Err(ProcessError::NotRunning { .. })));
}

#[tokio::test]
async fn build_args_omits_model_flag_when_none() {
    let args = build_args(None, "hello");
    assert!(!args.contains(&"--model".to_string()));
    assert_eq!(args.last(), Some(&"hello".to_string()));
}

#[tokio::test]
async fn build_args_includes_model_flag_when_given() {
    let args = build_args(Some("opus"), "hello");
    let index = args.iter().position(|a| a == "--model").unwrap();
    assert_eq!(args[index + 1], "opus");
}

#[tokio::test]
async fn completing_a_worker_frees_its_concurrency_slot() {
    let (manager, mut rx) = ProcessManager::new("true", 1);
    let selector = Selector::new(ModelTier::Cheap, SelectorConfig::default());

    manager.start(request("slot"), running_tree("slot"), selector.clone()).unwrap();
    let _ = rx.recv().await.expect("expected a Finished event");

    // Slot freed: starting a second feature now succeeds.
    for _ in 0..50 {
        if !manager.is_running("slot") {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(manager.start(request("slot2"), running_tree("slot2"), selector).is_ok());
}
