//! The `Feature` data model (§3) — a unit of work dispatched to a worker.

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::ids;

/// Minimum context budget (tokens) any feature may be allocated (§3, §4.6).
pub const MIN_CONTEXT_BUDGET: i64 = 10_000;

/// Default max-depth cap for the recursive feature tree.
pub const DEFAULT_MAX_DEPTH: i32 = 3;

/// Default max-retries before a feature becomes terminally `failed`.
pub const DEFAULT_MAX_RETRIES: i32 = 3;

/// Default bound on the adjustments log per feature (§9 open question,
/// fixed at 3).
pub const DEFAULT_MAX_ADJUSTMENTS: i32 = 3;

/// One of the three ordered model tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    Cheap,
    Mid,
    Premium,
}

impl ModelTier {
    pub fn escalate(self) -> Self {
        match self {
            ModelTier::Cheap => ModelTier::Mid,
            ModelTier::Mid => ModelTier::Premium,
            ModelTier::Premium => ModelTier::Premium,
        }
    }

    pub fn deescalate(self) -> Self {
        match self {
            ModelTier::Cheap => ModelTier::Cheap,
            ModelTier::Mid => ModelTier::Cheap,
            ModelTier::Premium => ModelTier::Mid,
        }
    }
}

/// A feature's declared model configuration: a fixed tier, or `auto` to let
/// the Auto Model Selector (C4) pick and adjust it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSelection {
    Fixed(ModelTier),
    Auto,
}

/// How a feature's tasks are executed relative to its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Sequential,
    Parallel,
}

/// Governs what happens to a parent when a child feature fails (§4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsolationLevel {
    Strict,
    #[default]
    Lenient,
}

/// Feature lifecycle status (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
    Stopped,
    Skipped,
}

impl FeatureStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FeatureStatus::Completed
                | FeatureStatus::Failed
                | FeatureStatus::Stopped
                | FeatureStatus::Skipped
        )
    }
}

/// One task within a feature's task list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

/// Why a model switch happened (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSwitchReason {
    Initial,
    ToolError,
    TestFailure,
    ComplexityDetected,
    Architectural,
    ExplicitRequest,
    MultipleErrors,
    Debugging,
    Deescalate,
    ConfiguredByUser,
}

/// A single append-only model-tier change (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSwitch {
    pub timestamp: DateTime<Utc>,
    /// `None` only for the very first (`initial`) switch.
    pub from_model: Option<ModelTier>,
    pub to_model: ModelTier,
    pub reason: ModelSwitchReason,
    #[serde(default)]
    pub detail: String,
}

/// Kind of append-only adjustment record (§3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    ModelEscalation,
    TaskSimplify,
    ContextExpand,
}

/// A single append-only adjustment (§3), bounded by `max_adjustments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub timestamp: DateTime<Utc>,
    pub kind: AdjustmentKind,
    pub from_value: String,
    pub to_value: String,
    pub attempt: i32,
}

/// A unit of work dispatched to a worker (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub description: String,
    pub tasks: Vec<Task>,

    pub model: ModelSelection,
    pub execution_mode: ExecutionMode,
    pub dependencies: Vec<String>,
    pub isolation_level: IsolationLevel,

    pub token_budget: Option<i64>,
    pub usd_budget: Option<f64>,
    pub context_budget: i64,

    pub depth: i32,
    pub max_depth: i32,

    pub original_model: ModelTier,
    pub current_model: ModelTier,
    pub model_switches: Vec<ModelSwitch>,
    pub adjustments: Vec<Adjustment>,

    pub status: FeatureStatus,
    pub attempts: i32,
    pub max_retries: i32,

    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,

    pub last_error: Option<String>,
    pub skip_reason: Option<String>,
}

impl Feature {
    /// Constructs a new root feature with the given title, using the
    /// initial-tier heuristic from §4.4 based on task count.
    pub fn new_root(title: impl Into<String>, tasks: Vec<Task>) -> Self {
        let title = title.into();
        let id = ids::root_feature_id(&title);
        let tier = initial_tier_for(&tasks);
        Self::build(id, None, title, tasks, 0, DEFAULT_MAX_DEPTH, tier)
    }

    /// Constructs a child feature. Callers (the RLM, §4.7) are responsible
    /// for enforcing depth/parent-status invariants before calling this.
    pub fn new_child(
        parent_id: &str,
        title: impl Into<String>,
        tasks: Vec<Task>,
        depth: i32,
        max_depth: i32,
        tier: ModelTier,
    ) -> Self {
        let title = title.into();
        let id = ids::child_feature_id(parent_id, &title);
        Self::build(
            id,
            Some(parent_id.to_string()),
            title,
            tasks,
            depth,
            max_depth,
            tier,
        )
    }

    fn build(
        id: String,
        parent_id: Option<String>,
        title: String,
        tasks: Vec<Task>,
        depth: i32,
        max_depth: i32,
        tier: ModelTier,
    ) -> Self {
        Self {
            id,
            parent_id,
            title,
            description: String::new(),
            tasks,
            model: ModelSelection::Auto,
            execution_mode: ExecutionMode::Sequential,
            dependencies: Vec::new(),
            isolation_level: IsolationLevel::default(),
            token_budget: None,
            usd_budget: None,
            context_budget: MIN_CONTEXT_BUDGET,
            depth,
            max_depth,
            original_model: tier,
            current_model: tier,
            model_switches: Vec::new(),
            adjustments: Vec::new(),
            status: FeatureStatus::Pending,
            attempts: 0,
            max_retries: DEFAULT_MAX_RETRIES,
            started_at: None,
            completed_at: None,
            last_error: None,
            skip_reason: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// `attempts < max_retries` — whether another retry may be attempted
    /// (§3 `CanRetry`).
    pub fn can_retry(&self) -> bool {
        self.attempts < self.max_retries
    }

    /// Resets a failed feature back to `pending`, clearing attempt-scoped
    /// state (§4.10 "Reset clears attempts, status, timestamps, errors, and
    /// adjustments").
    pub fn reset_for_retry(&mut self) {
        self.status = FeatureStatus::Pending;
        self.started_at = None;
        self.completed_at = None;
        self.last_error = None;
        self.adjustments.clear();
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        self.status = FeatureStatus::Running;
        self.attempts += 1;
        self.started_at = Some(now);
    }

    pub fn complete(&mut self, status: FeatureStatus, now: DateTime<Utc>) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.completed_at = Some(now);
    }

    pub fn push_model_switch(&mut self, switch: ModelSwitch) {
        self.current_model = switch.to_model;
        self.model_switches.push(switch);
    }

    pub fn push_adjustment(&mut self, adjustment: Adjustment, max_adjustments: i32) {
        if self.adjustments.len() as i32 >= max_adjustments {
            return;
        }
        self.adjustments.push(adjustment);
    }
}

/// Initial-tier heuristic (§4.4): a leaf task or <=2 tasks -> cheap; 3-5
/// tasks -> cheap; >5 tasks -> mid.
pub fn initial_tier_for(tasks: &[Task]) -> ModelTier {
    if tasks.len() > 5 {
        ModelTier::Mid
    } else {
        ModelTier::Cheap
    }
}

#[cfg(test)]
#[path = "feature.test.rs"]
mod tests;
