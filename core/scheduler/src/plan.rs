//! The PRD-derived plan (§4.10 input) — an ordered list of root features
//! with their declared dependencies, resolved to feature ids before
//! registration so the scheduler never has to re-resolve labels at
//! dispatch time.

use std::collections::HashMap;

use conductor_protocol::feature::ExecutionMode;
use conductor_protocol::feature::IsolationLevel;
use conductor_protocol::feature::ModelSelection;
use conductor_protocol::ids::root_feature_id;

/// One root feature as it appears in the PRD-derived plan, before
/// registration.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub title: String,
    pub description: String,
    pub tasks: Vec<String>,
    pub model: ModelSelection,
    pub execution_mode: ExecutionMode,
    /// Other features this one depends on, given as either the dependency's
    /// exact title or its 1-based ordinal position in the plan (§4.10
    /// "dependency list (ids or ordinal labels)").
    pub dependencies: Vec<String>,
    pub isolation_level: IsolationLevel,
    pub token_budget: Option<i64>,
    pub usd_budget: Option<f64>,
}

impl PlanEntry {
    pub fn new(title: impl Into<String>, tasks: Vec<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            tasks,
            model: ModelSelection::Auto,
            execution_mode: ExecutionMode::Sequential,
            dependencies: Vec::new(),
            isolation_level: IsolationLevel::default(),
            token_budget: None,
            usd_budget: None,
        }
    }
}

/// A plan entry with its dependency labels resolved to feature ids (§4.10:
/// dependencies are resolved once, at plan load, against titles and ordinal
/// position, so the scheduler's hot path never re-parses labels).
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    pub id: String,
    pub entry: PlanEntry,
    pub dependency_ids: Vec<String>,
}

/// Resolves every entry's dependency labels to feature ids. A label matches
/// another entry's exact title, or (if it parses as a 1-based integer) that
/// entry's ordinal position in `plan`. A label that matches neither is
/// dropped with a warning rather than rejecting the whole plan (§8: a
/// dangling dependency is treated as already satisfied).
pub fn resolve_plan(plan: Vec<PlanEntry>) -> Vec<ResolvedEntry> {
    let ids: Vec<String> = plan.iter().map(|entry| root_feature_id(&entry.title)).collect();
    let by_title: HashMap<&str, &str> =
        plan.iter().zip(ids.iter()).map(|(entry, id)| (entry.title.as_str(), id.as_str())).collect();

    let resolved: Vec<Vec<String>> = plan
        .iter()
        .map(|entry| {
            entry
                .dependencies
                .iter()
                .filter_map(|label| resolve_label(label, &by_title, &ids))
                .collect()
        })
        .collect();

    plan.into_iter()
        .zip(ids)
        .zip(resolved)
        .map(|((entry, id), dependency_ids)| ResolvedEntry { id, entry, dependency_ids })
        .collect()
}

fn resolve_label(label: &str, by_title: &HashMap<&str, &str>, ids: &[String]) -> Option<String> {
    if let Some(id) = by_title.get(label) {
        return Some((*id).to_string());
    }
    let ordinal = label.parse::<usize>().ok()?;
    if ordinal >= 1 && ordinal <= ids.len() {
        return Some(ids[ordinal - 1].clone());
    }
    tracing::warn!(label, "unresolvable plan dependency label, treating as satisfied");
    None
}

#[cfg(test)]
#[path = "plan.test.rs"]
mod tests;
