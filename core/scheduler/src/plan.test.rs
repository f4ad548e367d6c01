use pretty_assertions::assert_eq;

use super::*;

#[test]
fn resolves_dependency_by_exact_title() {
    let plan = vec![PlanEntry::new("auth", vec![]), {
        let mut e = PlanEntry::new("billing", vec![]);
        e.dependencies = vec!["auth".to_string()];
        e
    }];
    let resolved = resolve_plan(plan);
    assert_eq!(resolved[1].dependency_ids, vec![resolved[0].id.clone()]);
}

#[test]
fn resolves_dependency_by_ordinal_label() {
    let plan = vec![PlanEntry::new("auth", vec![]), {
        let mut e = PlanEntry::new("billing", vec![]);
        e.dependencies = vec!["1".to_string()];
        e
    }];
    let resolved = resolve_plan(plan);
    assert_eq!(resolved[1].dependency_ids, vec![resolved[0].id.clone()]);
}

#[test]
fn dangling_dependency_is_dropped_not_rejected() {
    let mut e = PlanEntry::new("billing", vec![]);
    e.dependencies = vec!["nonexistent".to_string()];
    let resolved = resolve_plan(vec![e]);
    assert!(resolved[0].dependency_ids.is_empty());
}

#[test]
fn entries_with_no_dependencies_resolve_empty() {
    let resolved = resolve_plan(vec![PlanEntry::new("solo", vec!["do the thing".to_string()])]);
    assert_eq!(resolved.len(), 1);
    assert!(resolved[0].dependency_ids.is_empty());
    assert_eq!(resolved[0].entry.tasks, vec!["do the thing".to_string()]);
}
