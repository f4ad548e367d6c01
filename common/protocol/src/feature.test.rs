use super::*;

fn tasks(n: usize) -> Vec<Task> {
    (0..n)
        .map(|i| Task {
            id: format!("t{i}"),
            description: format!("task {i}"),
            completed: false,
        })
        .collect()
}

#[test]
fn initial_tier_is_cheap_for_small_task_counts() {
    assert_eq!(initial_tier_for(&tasks(1)), ModelTier::Cheap);
    assert_eq!(initial_tier_for(&tasks(2)), ModelTier::Cheap);
    assert_eq!(initial_tier_for(&tasks(5)), ModelTier::Cheap);
}

#[test]
fn initial_tier_is_mid_above_five_tasks() {
    assert_eq!(initial_tier_for(&tasks(6)), ModelTier::Mid);
}

#[test]
fn new_root_has_no_parent_and_is_pending() {
    let f = Feature::new_root("Add login form", tasks(1));
    assert!(f.is_root());
    assert_eq!(f.status, FeatureStatus::Pending);
    assert_eq!(f.depth, 0);
    assert_eq!(f.id.len(), 16);
}

#[test]
fn new_child_is_non_root() {
    let parent = Feature::new_root("Parent", tasks(1));
    let child = Feature::new_child(&parent.id, "Child", tasks(1), 1, 3, ModelTier::Cheap);
    assert!(!child.is_root());
    assert_eq!(child.parent_id.as_deref(), Some(parent.id.as_str()));
    assert_eq!(child.depth, 1);
}

#[test]
fn can_retry_respects_max_retries() {
    let mut f = Feature::new_root("F", tasks(1));
    f.max_retries = 2;
    f.attempts = 0;
    assert!(f.can_retry());
    f.attempts = 2;
    assert!(!f.can_retry());
}

#[test]
fn reset_for_retry_clears_attempt_scoped_state_but_not_attempts() {
    let mut f = Feature::new_root("F", tasks(1));
    f.start(Utc::now());
    f.complete(FeatureStatus::Failed, Utc::now());
    f.last_error = Some("boom".to_string());
    f.adjustments.push(Adjustment {
        timestamp: Utc::now(),
        kind: AdjustmentKind::ModelEscalation,
        from_value: "cheap".into(),
        to_value: "mid".into(),
        attempt: 1,
    });

    f.reset_for_retry();

    assert_eq!(f.status, FeatureStatus::Pending);
    assert!(f.started_at.is_none());
    assert!(f.completed_at.is_none());
    assert!(f.last_error.is_none());
    assert!(f.adjustments.is_empty());
    assert_eq!(f.attempts, 1, "attempts counter is not reset by retry");
}

#[test]
fn push_model_switch_updates_current_model() {
    let mut f = Feature::new_root("F", tasks(1));
    f.push_model_switch(ModelSwitch {
        timestamp: Utc::now(),
        from_model: None,
        to_model: ModelTier::Cheap,
        reason: ModelSwitchReason::Initial,
        detail: String::new(),
    });
    f.push_model_switch(ModelSwitch {
        timestamp: Utc::now(),
        from_model: Some(ModelTier::Cheap),
        to_model: ModelTier::Mid,
        reason: ModelSwitchReason::MultipleErrors,
        detail: String::new(),
    });
    assert_eq!(f.current_model, ModelTier::Mid);
    assert_eq!(f.model_switches.len(), 2);
}

#[test]
fn push_adjustment_is_bounded_by_max_adjustments() {
    let mut f = Feature::new_root("F", tasks(1));
    for i in 0..5 {
        f.push_adjustment(
            Adjustment {
                timestamp: Utc::now(),
                kind: AdjustmentKind::ModelEscalation,
                from_value: "a".into(),
                to_value: "b".into(),
                attempt: i,
            },
            DEFAULT_MAX_ADJUSTMENTS,
        );
    }
    assert_eq!(f.adjustments.len() as i32, DEFAULT_MAX_ADJUSTMENTS);
}

#[test]
fn tier_escalate_and_deescalate_saturate_at_bounds() {
    assert_eq!(ModelTier::Premium.escalate(), ModelTier::Premium);
    assert_eq!(ModelTier::Cheap.deescalate(), ModelTier::Cheap);
    assert_eq!(ModelTier::Cheap.escalate(), ModelTier::Mid);
    assert_eq!(ModelTier::Mid.escalate(), ModelTier::Premium);
}

#[test]
fn status_terminal_classification() {
    assert!(FeatureStatus::Completed.is_terminal());
    assert!(FeatureStatus::Failed.is_terminal());
    assert!(FeatureStatus::Stopped.is_terminal());
    assert!(FeatureStatus::Skipped.is_terminal());
    assert!(!FeatureStatus::Pending.is_terminal());
    assert!(!FeatureStatus::Running.is_terminal());
}
