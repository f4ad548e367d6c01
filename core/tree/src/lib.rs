//! Recursive Feature Tree (C7, §4.7) — the RLM.
//!
//! A rooted forest of [`Feature`]s, stored flat (id -> node) per §9's design
//! note ("Store Features in a flat id->node map; children hold parent-id
//! strings; iteration is post-order over this structure — no pointer
//! cycles"). All structural mutation goes through a single tree-level lock
//! (§5 "tree-level operations take a tree-level lock").

pub mod error;
pub mod result;

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::DateTime;
use chrono::Utc;
use conductor_accumulator::Accumulator;
use conductor_actions::Action;
use conductor_context::budget_for_depth;
use conductor_protocol::feature::Feature;
use conductor_protocol::feature::FeatureStatus;
use conductor_protocol::feature::Task;
use conductor_protocol::spawn::SpawnRequest;
use conductor_protocol::stream_event::StreamEvent;
use conductor_protocol::token_usage::TokenUsage;

pub use error::TreeError;
pub use result::SpawnResult;
pub use result::generate_result_context;

struct TreeState {
    features: HashMap<String, Feature>,
    children: HashMap<String, Vec<String>>,
    /// Each feature's subtree-wide base context budget, fixed at the root
    /// and inherited unchanged by every descendant so siblings at the same
    /// depth see equal shares (§4.6).
    base_budgets: HashMap<String, i64>,
    accumulators: HashMap<String, Accumulator>,
    actions: HashMap<String, Vec<Action>>,
}

/// A rooted forest of features with bounded depth and spawn validation
/// (§4.7).
pub struct FeatureTree {
    state: Mutex<TreeState>,
}

impl Default for FeatureTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureTree {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TreeState {
                features: HashMap::new(),
                children: HashMap::new(),
                base_budgets: HashMap::new(),
                accumulators: HashMap::new(),
                actions: HashMap::new(),
            }),
        }
    }

    /// Adds a root feature with the given title and tasks, using a default
    /// max-depth and the given base context budget (§4.7 `Register`).
    /// Registering the same title twice refreshes its values but is a
    /// structural no-op (§8 idempotence).
    pub fn register(&self, title: impl Into<String>, tasks: Vec<Task>, base_context_budget: i64) -> Feature {
        let title = title.into();
        let mut feature = Feature::new_root(title, tasks);
        feature.context_budget = base_context_budget.max(conductor_context::MIN_CONTEXT_BUDGET);

        let mut state = self.state.lock().expect("tree lock poisoned");
        let id = feature.id.clone();
        state.children.entry(id.clone()).or_default();
        state.base_budgets.insert(id.clone(), base_context_budget);
        state.accumulators.entry(id.clone()).or_default();
        state.actions.entry(id.clone()).or_default();
        state.features.insert(id, feature.clone());
        feature
    }

    pub fn get(&self, id: &str) -> Option<Feature> {
        let state = self.state.lock().expect("tree lock poisoned");
        state.features.get(id).cloned()
    }

    /// Mutates a feature in place under the tree lock, returning
    /// `FeatureNotFound` if it doesn't exist.
    pub fn update(&self, id: &str, f: impl FnOnce(&mut Feature)) -> Result<Feature, TreeError> {
        let mut state = self.state.lock().expect("tree lock poisoned");
        let feature = state
            .features
            .get_mut(id)
            .ok_or_else(|| error::FeatureNotFoundSnafu { id: id.to_string() }.build())?;
        f(feature);
        Ok(feature.clone())
    }

    /// `Spawn(parent_id, req)` (§4.7): succeeds iff the parent is running
    /// and below its max-depth cap.
    pub fn spawn(&self, parent_id: &str, req: &SpawnRequest) -> Result<Feature, TreeError> {
        let mut state = self.state.lock().expect("tree lock poisoned");
        let parent = state
            .features
            .get(parent_id)
            .ok_or_else(|| error::FeatureNotFoundSnafu { id: parent_id.to_string() }.build())?
            .clone();

        if req.title.trim().is_empty() {
            return Err(error::InvalidSpawnDataSnafu { reason: "empty title".to_string() }.build());
        }
        if parent.status != FeatureStatus::Running {
            return Err(error::ParentNotRunningSnafu { id: parent_id.to_string() }.build());
        }
        if parent.depth >= parent.max_depth {
            return Err(error::MaxDepthExceededSnafu { id: parent_id.to_string() }.build());
        }

        let child_depth = parent.depth + 1;
        let max_depth = match req.max_depth {
            Some(override_depth) if override_depth > 0 => parent.max_depth.min(override_depth),
            _ => parent.max_depth,
        };

        let tier = req.model.unwrap_or(parent.current_model);
        let tasks: Vec<Task> = req
            .tasks
            .iter()
            .enumerate()
            .map(|(i, description)| Task {
                id: format!("t{i}"),
                description: description.clone(),
                completed: false,
            })
            .collect();

        let mut child = Feature::new_child(parent_id, req.title.clone(), tasks, child_depth, max_depth, tier);
        child.model = parent.model;
        child.execution_mode = parent.execution_mode;
        child.isolation_level = parent.isolation_level;
        if let Some(description) = &req.description {
            child.description = description.clone();
        }

        let base_budget = *state.base_budgets.get(parent_id).unwrap_or(&child.context_budget);
        child.context_budget = budget_for_depth(base_budget, child_depth);

        let child_id = child.id.clone();
        state.children.entry(parent_id.to_string()).or_default().push(child_id.clone());
        state.children.entry(child_id.clone()).or_default();
        state.base_budgets.insert(child_id.clone(), base_budget);
        state.accumulators.entry(child_id.clone()).or_default();
        state.actions.entry(child_id.clone()).or_default();
        state.features.insert(child_id, child.clone());

        tracing::info!(parent_id, child_id = %child.id, title = %child.title, "spawned child feature");
        Ok(child)
    }

    /// Whether `id` could currently spawn a child (running, below max
    /// depth) — used by [`Self::ingest`] to eagerly reject spawn requests
    /// without constructing them first (§4.7 Tracker).
    pub fn can_spawn(&self, id: &str) -> Result<bool, TreeError> {
        let state = self.state.lock().expect("tree lock poisoned");
        let feature = state
            .features
            .get(id)
            .ok_or_else(|| error::FeatureNotFoundSnafu { id: id.to_string() }.build())?;
        Ok(feature.status == FeatureStatus::Running && feature.depth < feature.max_depth)
    }

    /// `Complete(id, status, summary)` (§4.7): transitions to a terminal
    /// status, stamps `completed_at`, and returns the `SpawnResult`.
    pub fn complete(
        &self,
        id: &str,
        status: FeatureStatus,
        summary: impl Into<String>,
        error_text: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<SpawnResult, TreeError> {
        debug_assert!(status.is_terminal());
        let summary = summary.into();
        let mut state = self.state.lock().expect("tree lock poisoned");
        let feature = state
            .features
            .get_mut(id)
            .ok_or_else(|| error::FeatureNotFoundSnafu { id: id.to_string() }.build())?;
        feature.complete(status, now);
        if let Some(text) = &error_text {
            feature.last_error = Some(text.clone());
        }
        let title = feature.title.clone();

        let usage = state.accumulators.get(id).map(Accumulator::snapshot).unwrap_or_default();

        tracing::info!(id, ?status, "feature completed");
        Ok(SpawnResult {
            id: id.to_string(),
            title,
            status,
            summary,
            token_usage_snapshot: usage,
            error: error_text,
        })
    }

    /// Removes `id` and every descendant (§3 "removing a parent removes
    /// descendants").
    pub fn remove_subtree(&self, id: &str) {
        let mut state = self.state.lock().expect("tree lock poisoned");
        let mut stack = vec![id.to_string()];
        while let Some(current) = stack.pop() {
            if let Some(kids) = state.children.remove(&current) {
                stack.extend(kids);
            }
            state.features.remove(&current);
            state.base_budgets.remove(&current);
            state.accumulators.remove(&current);
            state.actions.remove(&current);
        }
    }

    pub fn children_of(&self, id: &str) -> Vec<String> {
        let state = self.state.lock().expect("tree lock poisoned");
        state.children.get(id).cloned().unwrap_or_default()
    }

    /// Accumulates a usage delta for `id` (used by [`Self::ingest`] and
    /// directly by callers that already have a parsed event, §4.2/§4.7).
    pub fn record_usage(&self, id: &str, input: i64, output: i64, cache_read: i64, cache_write: i64, cost_usd: f64) {
        let state = self.state.lock().expect("tree lock poisoned");
        if let Some(accumulator) = state.accumulators.get(id) {
            accumulator.update(input, output, cache_read, cache_write, cost_usd);
        }
    }

    pub fn accumulator(&self, id: &str) -> Option<Accumulator> {
        let state = self.state.lock().expect("tree lock poisoned");
        state.accumulators.get(id).cloned()
    }

    /// Post-order sum of token usage over the subtree rooted at `id` (§4.7
    /// `TotalTokenUsage`).
    pub fn total_token_usage(&self, id: &str) -> TokenUsage {
        let state = self.state.lock().expect("tree lock poisoned");
        let mut total = TokenUsage::new();
        Self::walk_post_order(&state, id, &mut |node_id| {
            if let Some(accumulator) = state.accumulators.get(node_id) {
                total.add(&accumulator.snapshot());
            }
        });
        total
    }

    /// Post-order concatenation of recorded actions over the subtree rooted
    /// at `id` (§4.7 `AllActions`).
    pub fn all_actions(&self, id: &str) -> Vec<Action> {
        let state = self.state.lock().expect("tree lock poisoned");
        let mut out = Vec::new();
        Self::walk_post_order(&state, id, &mut |node_id| {
            if let Some(actions) = state.actions.get(node_id) {
                out.extend(actions.iter().cloned());
            }
        });
        out
    }

    fn walk_post_order(state: &TreeState, id: &str, visit: &mut impl FnMut(&str)) {
        if let Some(children) = state.children.get(id) {
            for child in children {
                Self::walk_post_order(state, child, visit);
            }
        }
        visit(id);
    }

    /// Per-feature ingestion (§4.7 Tracker): updates the accumulator on
    /// usage-bearing events, records an action on `ToolUse`, and detects
    /// `ralph_spawn_feature` tool uses, returning a validated
    /// [`SpawnRequest`] for the caller (normally the scheduler) to act on.
    pub fn ingest(
        &self,
        feature_id: &str,
        event: &StreamEvent,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<SpawnRequest>, TreeError> {
        if let Some(usage) = event.usage() {
            self.record_usage(
                feature_id,
                usage.input_tokens,
                usage.output_tokens,
                usage.cache_read_tokens,
                usage.cache_write_tokens,
                usage.cost_usd,
            );
        }

        let StreamEvent::ToolUse { tool, input } = event else {
            return Ok(None);
        };

        if tool.eq_ignore_ascii_case(conductor_actions::SPAWN_TOOL_NAME) {
            if !self.can_spawn(feature_id)? {
                return Err(error::MaxDepthExceededSnafu { id: feature_id.to_string() }.build());
            }
            let request = SpawnRequest::from_tool_input(input).map_err(|_| {
                error::InvalidSpawnDataSnafu { reason: "unparsable or missing title".to_string() }.build()
            })?;
            return Ok(Some(request));
        }

        if let Some(action) = conductor_actions::classify(tool, input, timestamp) {
            let mut state = self.state.lock().expect("tree lock poisoned");
            state.actions.entry(feature_id.to_string()).or_default().push(action);
        }

        Ok(None)
    }
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
