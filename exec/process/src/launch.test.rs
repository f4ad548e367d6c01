use std::sync::Arc;

use conductor_model_selector::Selector;
use conductor_model_selector::SelectorConfig;
use conductor_protocol::feature::ModelTier;
use conductor_tree::FeatureTree;
use tokio_util::sync::CancellationToken;

use super::*;

fn test_tree() -> Arc<FeatureTree> {
    let tree = Arc::new(FeatureTree::new());
    let feature = tree.register("t", Vec::new(), 100_000);
    tree.update(&feature.id, |f| f.status = conductor_protocol::feature::FeatureStatus::Running).unwrap();
    tree
}

#[tokio::test]
async fn successful_exit_reports_completed() {
    let tree = test_tree();
    let selector = Selector::new(ModelTier::Cheap, SelectorConfig::default());
    let (tx, mut rx) = tokio::sync::mpsc::channel(16);

    launch(
        LaunchRequest {
            feature_id: "f1".to_string(),
            command: "true".to_string(),
            args: Vec::new(),
            cwd: std::env::temp_dir(),
        },
        tree,
        selector,
        CancellationToken::new(),
        tx,
        || {},
    );

    let event = rx.recv().await.expect("expected a Finished event");
    match event {
        ManagerEvent::Finished { feature_id, outcome } => {
            assert_eq!(feature_id, "f1");
            assert_eq!(outcome, WorkerOutcome::Completed);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn nonzero_exit_reports_failed() {
    let tree = test_tree();
    let selector = Selector::new(ModelTier::Cheap, SelectorConfig::default());
    let (tx, mut rx) = tokio::sync::mpsc::channel(16);

    launch(
        LaunchRequest {
            feature_id: "f2".to_string(),
            command: "false".to_string(),
            args: Vec::new(),
            cwd: std::env::temp_dir(),
        },
        tree,
        selector,
        CancellationToken::new(),
        tx,
        || {},
    );

    let event = rx.recv().await.expect("expected a Finished event");
    match event {
        ManagerEvent::Finished { outcome, .. } => assert!(matches!(outcome, WorkerOutcome::Failed { .. })),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn cancellation_reports_stopped() {
    let tree = test_tree();
    let selector = Selector::new(ModelTier::Cheap, SelectorConfig::default());
    let (tx, mut rx) = tokio::sync::mpsc::channel(16);
    let cancel = CancellationToken::new();
    cancel.cancel();

    launch(
        LaunchRequest {
            feature_id: "f3".to_string(),
            command: "sleep".to_string(),
            args: vec!["5".to_string()],
            cwd: std::env::temp_dir(),
        },
        tree,
        selector,
        cancel,
        tx,
        || {},
    );

    let event = rx.recv().await.expect("expected a Finished event");
    match event {
        ManagerEvent::Finished { outcome, .. } => assert_eq!(outcome, WorkerOutcome::Stopped),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn read_line_capped_truncates_oversized_lines() {
    let oversized = "a".repeat(MAX_LINE_BYTES + 1000);
    let input = format!("{oversized}\nshort\n");
    let mut reader = tokio::io::BufReader::new(input.as_bytes());
    let mut scratch = Vec::new();

    let first = read_line_capped(&mut reader, &mut scratch).await.unwrap().unwrap();
    assert_eq!(first.len(), MAX_LINE_BYTES);

    let second = read_line_capped(&mut reader, &mut scratch).await.unwrap().unwrap();
    assert_eq!(second, b"short");

    assert!(read_line_capped(&mut reader, &mut scratch).await.unwrap().is_none());
}
