//! The on-disk `Plan` the scheduler dispatches against (§1, §6).
//!
//! PRD markdown parsing is deliberately out of scope (§1 "Deliberately out
//! of scope"): the core only ever sees a structured `Plan`. This module is
//! the host-side boundary that turns a plan document — produced by
//! whatever PRD-to-plan tool sits in front of this CLI — into the
//! [`conductor_scheduler::plan::PlanEntry`] values the scheduler consumes,
//! resolving the `Budget:`/`Tokens:`/`Context:` metadata syntax (§6) along
//! the way.

use std::path::Path;

use conductor_budget::BudgetValue;
use conductor_protocol::feature::ExecutionMode;
use conductor_protocol::feature::IsolationLevel;
use conductor_protocol::feature::ModelSelection;
use conductor_protocol::feature::ModelTier;
use conductor_scheduler::plan::PlanEntry;
use serde::Deserialize;

/// One root feature as it appears in the plan file on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PlanFileEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub isolation: Option<String>,
    /// Budget metadata in the `Budget: $5.00` / `Tokens: 100k` / `Context:
    /// 1.5M tokens` syntax (§6). Either axis, or neither, may be set.
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub tokens: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlanFile {
    pub features: Vec<PlanFileEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanFileError {
    #[error("failed to read plan file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("failed to parse plan file {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("feature {title:?}: {source}")]
    Budget { title: String, source: conductor_budget::BudgetError },
}

/// Loads and resolves a plan file into the entries `Scheduler::load_plan`
/// expects, in file order (§4.10 "in PRD order").
pub fn load_plan_file(path: &Path) -> Result<Vec<PlanEntry>, PlanFileError> {
    let raw = std::fs::read_to_string(path).map_err(|source| PlanFileError::Read { path: path.display().to_string(), source })?;
    let file: PlanFile =
        serde_json::from_str(&raw).map_err(|source| PlanFileError::Parse { path: path.display().to_string(), source })?;

    file.features.into_iter().map(to_plan_entry).collect()
}

fn to_plan_entry(entry: PlanFileEntry) -> Result<PlanEntry, PlanFileError> {
    let mut plan_entry = PlanEntry::new(entry.title.clone(), entry.tasks);
    plan_entry.description = entry.description;
    plan_entry.execution_mode = if entry.parallel { ExecutionMode::Parallel } else { ExecutionMode::Sequential };
    plan_entry.dependencies = entry.dependencies;
    plan_entry.model = parse_model(entry.model.as_deref());
    plan_entry.isolation_level = parse_isolation(entry.isolation.as_deref());

    if let Some(raw) = &entry.budget {
        match parse_budget_value(raw, &entry.title)? {
            BudgetValue::Usd(usd) => plan_entry.usd_budget = Some(usd),
            BudgetValue::Tokens(tokens) => plan_entry.token_budget = Some(tokens),
        }
    }
    if let Some(raw) = &entry.tokens {
        if let BudgetValue::Tokens(tokens) = parse_budget_value(raw, &entry.title)? {
            plan_entry.token_budget = Some(tokens);
        }
    }

    Ok(plan_entry)
}

fn parse_budget_value(raw: &str, title: &str) -> Result<BudgetValue, PlanFileError> {
    conductor_budget::parse_budget_checked(raw).map_err(|source| PlanFileError::Budget { title: title.to_string(), source })
}

fn parse_model(raw: Option<&str>) -> ModelSelection {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        None | Some("auto") => ModelSelection::Auto,
        Some("haiku") | Some("cheap") => ModelSelection::Fixed(ModelTier::Cheap),
        Some("sonnet") | Some("mid") => ModelSelection::Fixed(ModelTier::Mid),
        Some("opus") | Some("premium") => ModelSelection::Fixed(ModelTier::Premium),
        Some(_) => ModelSelection::Auto,
    }
}

fn parse_isolation(raw: Option<&str>) -> IsolationLevel {
    match raw.map(str::to_ascii_lowercase).as_deref() {
        Some("strict") => IsolationLevel::Strict,
        _ => IsolationLevel::Lenient,
    }
}

#[cfg(test)]
#[path = "plan_file.test.rs"]
mod tests;
