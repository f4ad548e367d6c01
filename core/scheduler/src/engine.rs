//! The [`Scheduler`] itself — dependency-ordered dispatch, retry
//! governance, spawn/fault wiring, and the auto-mode main loop (§4.10).

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use conductor_budget::BudgetTracker;
use conductor_config::Config;
use conductor_context::ChildPromptInput;
use conductor_context::build_child_prompt;
use conductor_fault::FaultIsolationEngine;
use conductor_model_selector::Selector;
use conductor_model_selector::SelectorConfig;
use conductor_process::ManagerEvent;
use conductor_process::ProcessManager;
use conductor_process::StartRequest;
use conductor_process::WorkerOutcome;
use conductor_progress::ProgressStore;
use conductor_protocol::failure::FailureAction;
use conductor_protocol::failure::FailureInfo;
use conductor_protocol::feature::Feature;
use conductor_protocol::feature::FeatureStatus;
use conductor_protocol::feature::ModelSelection;
use conductor_protocol::feature::ModelTier;
use conductor_protocol::snapshot::FeatureState;
use conductor_protocol::snapshot::SnapshotConfig;
use conductor_protocol::spawn::SpawnRequest;
use conductor_tree::FeatureTree;
use conductor_tree::generate_result_context;
use tokio::sync::mpsc;

use crate::decision;
use crate::decision::DispatchState;
use crate::error::SchedulerError;
use crate::plan::ResolvedEntry;

/// How a tick of the auto-mode main loop should be scheduled (§4.10).
const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// How auto mode concluded (§4.10 step 4, §7 "summary status").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoOutcome {
    /// Every root feature reached `completed` or `skipped`.
    AllCompleted,
    /// Auto mode ended with one or more features `failed` at max retries
    /// (§7 "stopped: some features failed after max retries").
    SomeFailed { failed_ids: Vec<String> },
}

struct RootMeta {
    dependency_ids: Vec<String>,
}

/// What the scheduler remembers about a feature it has started, beyond
/// what [`FeatureTree`] itself tracks: its per-feature model selector (the
/// audit trail lives here, not on the `Feature` struct, §4.4) and its
/// budget-threshold edge tracker (§4.5).
struct RunState {
    selector: Selector,
    budget: BudgetTracker,
}

/// Ties every other component into the dependency-ordered dispatch and
/// retry loop described in §4.10. Grounded on `core/loop/src/driver.rs`'s
/// channel-driven main loop.
pub struct Scheduler {
    config: Config,
    cwd: PathBuf,
    tree: Arc<FeatureTree>,
    process: Arc<ProcessManager>,
    fault: Arc<FaultIsolationEngine>,
    progress: Arc<ProgressStore>,

    run_state: Mutex<HashMap<String, RunState>>,
    /// The `SpawnRequest` each running or recorded-failed child was last
    /// started from, so the fault isolation engine can re-queue the exact
    /// same request on retry (§4.8 `Retry`).
    spawn_requests: Mutex<HashMap<String, SpawnRequest>>,
    /// Root features in plan order, with their resolved dependency ids
    /// (§4.10 step 1 "in PRD order").
    roots: Mutex<Vec<String>>,
    root_meta: Mutex<HashMap<String, RootMeta>>,
    /// Children a parent is still waiting on, used only to know when a
    /// parent has no outstanding children left (§4.10 "tracks the parent
    /// as waiting on children").
    pending_children: Mutex<HashMap<String, HashSet<String>>>,

    global_budget: Mutex<BudgetTracker>,

    events_rx: Mutex<Option<mpsc::Receiver<ManagerEvent>>>,
}

impl Scheduler {
    /// Builds a scheduler bound to `cwd` (the worker subprocess's working
    /// directory) with its progress store loaded from `config`'s paths.
    pub fn new(config: Config, cwd: PathBuf, prd_hash: Option<String>) -> Result<Self, SchedulerError> {
        let tree = Arc::new(FeatureTree::new());
        let (process, events_rx) = ProcessManager::new(config.worker_command.clone(), config.max_concurrency);
        let fault = Arc::new(FaultIsolationEngine::new());

        let snapshot_config = SnapshotConfig { max_retries: config.max_retries, max_concurrency: config.max_concurrency as i32 };
        let progress = ProgressStore::load_or_init(&config.progress_path, &config.legacy_progress_path, prd_hash, snapshot_config)
            .map_err(|source| SchedulerError::Progress { source })?;

        Ok(Self {
            config,
            cwd,
            tree,
            process: Arc::new(process),
            fault,
            progress: Arc::new(progress),
            run_state: Mutex::new(HashMap::new()),
            spawn_requests: Mutex::new(HashMap::new()),
            roots: Mutex::new(Vec::new()),
            root_meta: Mutex::new(HashMap::new()),
            pending_children: Mutex::new(HashMap::new()),
            global_budget: Mutex::new(BudgetTracker::new()),
            events_rx: Mutex::new(Some(events_rx)),
        })
    }

    /// Registers every root feature from a resolved plan, in plan order
    /// (§4.10 input). Registering is idempotent per entry (§8) since it
    /// delegates to [`FeatureTree::register`].
    pub fn load_plan(&self, entries: Vec<ResolvedEntry>) {
        let mut roots = self.roots.lock().expect("roots lock poisoned");
        let mut root_meta = self.root_meta.lock().expect("root meta lock poisoned");
        for resolved in entries {
            let tasks = resolved
                .entry
                .tasks
                .iter()
                .enumerate()
                .map(|(i, description)| conductor_protocol::feature::Task {
                    id: format!("t{i}"),
                    description: description.clone(),
                    completed: false,
                })
                .collect();

            let feature = self.tree.register(resolved.entry.title.clone(), tasks, self.config.base_context_budget);
            let id = feature.id.clone();
            let _ = self.tree.update(&id, |f| {
                f.description = resolved.entry.description.clone();
                f.execution_mode = resolved.entry.execution_mode;
                f.isolation_level = resolved.entry.isolation_level;
                f.dependencies = resolved.dependency_ids.clone();
                f.token_budget = resolved.entry.token_budget;
                f.usd_budget = resolved.entry.usd_budget;
                f.max_retries = self.config.max_retries;
                if let ModelSelection::Fixed(tier) = resolved.entry.model {
                    f.model = ModelSelection::Fixed(tier);
                    f.original_model = tier;
                    f.current_model = tier;
                }
            });

            roots.push(id.clone());
            root_meta.insert(id, RootMeta { dependency_ids: resolved.dependency_ids });
        }
    }

    /// Runs the auto-mode main loop until every root feature is terminal
    /// and no more retries remain (§4.10). Consumes the process manager's
    /// event channel; calling this a second time without a fresh scheduler
    /// returns [`SchedulerError::NotRunning`].
    pub async fn run_auto(&self) -> Result<AutoOutcome, SchedulerError> {
        let mut events_rx = self.events_rx.lock().expect("events lock poisoned").take().ok_or(SchedulerError::NotRunning)?;

        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            if let Some(outcome) = self.check_exhausted() {
                return Ok(outcome);
            }

            tokio::select! {
                _ = ticker.tick() => {
                    self.dispatch_ready();
                }
                event = events_rx.recv() => {
                    match event {
                        Some(event) => self.handle_manager_event(event),
                        None => return Ok(self.check_exhausted().unwrap_or(AutoOutcome::AllCompleted)),
                    }
                }
            }
        }
    }

    /// Cancels every running worker (§4.10 "Scheduler cancellation
    /// cascades to `StopAll`").
    pub fn stop_all(&self) {
        self.process.stop_all();
    }

    /// Explicit acknowledgement of the global budget signal, unblocking
    /// further worker starts (§4.5).
    pub fn acknowledge_global_budget(&self) {
        self.global_budget.lock().expect("global budget lock poisoned").acknowledge();
    }

    pub fn progress(&self) -> conductor_protocol::snapshot::ProgressSnapshot {
        self.progress.snapshot()
    }

    /// Reconciles freshly-registered root features against an
    /// already-loaded progress snapshot (§4.11 "reload on startup"): a
    /// root the snapshot already recorded as terminal is marked terminal
    /// in the tree too, so a resumed run does not redo completed work.
    /// Best-effort per §1 ("progress is snapshot-based, best-effort") —
    /// this does not attempt to reconstruct a terminal feature's
    /// descendants, only its own status.
    pub fn reconcile_with_snapshot(&self) {
        let snapshot = self.progress.snapshot();
        let roots = self.roots.lock().expect("roots lock poisoned").clone();
        for id in &roots {
            let Some(state) = snapshot.features.get(id) else { continue };
            if !state.feature.status.is_terminal() {
                continue;
            }
            let _ = self.tree.update(id, |f| {
                f.status = state.feature.status;
                f.attempts = state.feature.attempts;
                f.completed_at = state.feature.completed_at;
                f.last_error = state.feature.last_error.clone();
            });
        }
    }

    // ---- dispatch ----

    /// §4.10 steps 1-2: start the first ready feature in plan order, else
    /// the first retryable failure. A no-op (tick again later) if at
    /// concurrency cap or the global budget needs acknowledgement.
    fn dispatch_ready(&self) {
        if self.global_budget.lock().expect("global budget lock poisoned").needs_acknowledgement() {
            return;
        }
        if self.process.running_count() >= self.config.max_concurrency {
            return;
        }

        let roots = self.dispatch_states();
        if let Some(id) = decision::next_ready(&roots) {
            self.start_feature(id.to_string());
            return;
        }
        if let Some(id) = decision::next_retryable_failed(&roots) {
            if let Ok(feature) = self.tree.update(id, |f| f.reset_for_retry()) {
                tracing::info!(id = %feature.id, attempts = feature.attempts, "retrying failed feature");
                self.start_feature(feature.id);
            }
        }
    }

    fn dispatch_states(&self) -> Vec<DispatchState> {
        let roots = self.roots.lock().expect("roots lock poisoned");
        let root_meta = self.root_meta.lock().expect("root meta lock poisoned");
        roots
            .iter()
            .filter_map(|id| {
                let feature = self.tree.get(id)?;
                let dependency_ids = root_meta.get(id).map(|m| m.dependency_ids.clone()).unwrap_or_default();
                Some(DispatchState { id: id.clone(), status: feature.status, can_retry: feature.can_retry(), dependency_ids })
            })
            .collect()
    }

    fn check_exhausted(&self) -> Option<AutoOutcome> {
        let roots = self.dispatch_states();
        if !decision::is_exhausted(&roots, self.process.running_count()) {
            return None;
        }
        let failed_ids: Vec<String> = roots.iter().filter(|r| r.status == FeatureStatus::Failed).map(|r| r.id.clone()).collect();
        Some(if failed_ids.is_empty() { AutoOutcome::AllCompleted } else { AutoOutcome::SomeFailed { failed_ids } })
    }

    // ---- starting a worker ----

    /// Starts (or restarts) the worker for `id`, creating its model
    /// selector on first start and reusing it across retries so the
    /// switch log remains the audit trail across attempts (§4.4).
    fn start_feature(&self, id: String) {
        let Ok(feature) = self.tree.update(&id, |f| f.start(Utc::now())) else {
            return;
        };

        let selector = self.selector_for(&feature);
        let model = self.model_flag(&selector, feature.current_model);
        let prompt = self.build_prompt(&feature);

        let request = StartRequest { feature_id: id.clone(), cwd: self.cwd.clone(), prompt, model };
        if let Err(error) = self.process.start(request, self.tree.clone(), selector) {
            tracing::warn!(id, %error, "failed to start worker");
            let _ = self.tree.update(&id, |f| {
                f.status = FeatureStatus::Failed;
                f.last_error = Some(error.to_string());
                f.completed_at = Some(Utc::now());
            });
            return;
        }

        self.save_progress();
    }

    fn selector_for(&self, feature: &Feature) -> Selector {
        let mut run_state = self.run_state.lock().expect("run state lock poisoned");
        if let Some(existing) = run_state.get(&feature.id) {
            return existing.selector.clone();
        }
        let mut config = SelectorConfig::default();
        if let ModelSelection::Fixed(_) = feature.model {
            config.enabled = false;
        }
        let selector = Selector::new(feature.current_model, config);
        run_state.insert(feature.id.clone(), RunState { selector: selector.clone(), budget: BudgetTracker::new() });
        selector
    }

    /// §6 "the model tier is passed only when non-default": a feature's
    /// *default* is the tier it started at, so the flag is omitted until
    /// the selector has actually recorded a switch beyond `initial`.
    fn model_flag(&self, selector: &Selector, tier: ModelTier) -> Option<String> {
        if selector.switches().len() <= 1 {
            return None;
        }
        Some(
            match tier {
                ModelTier::Cheap => &self.config.model_tiers.cheap,
                ModelTier::Mid => &self.config.model_tiers.mid,
                ModelTier::Premium => &self.config.model_tiers.premium,
            }
            .clone(),
        )
    }

    fn build_prompt(&self, feature: &Feature) -> String {
        let Some(parent_id) = &feature.parent_id else {
            return build_root_prompt(feature);
        };

        let parent_section = self.tree.get(parent_id).map(|parent| format!("# {}\n\n{}", parent.title, parent.description));
        let child_tasks: Vec<String> = feature.tasks.iter().map(|t| t.description.clone()).collect();
        build_child_prompt(&ChildPromptInput {
            child_title: &feature.title,
            child_tasks: &child_tasks,
            child_budget: feature.context_budget,
            parent_section: parent_section.as_deref(),
            project_context: None,
            recent_progress: None,
        })
    }

    // ---- handling manager events ----

    fn handle_manager_event(&self, event: ManagerEvent) {
        match event {
            ManagerEvent::Output { feature_id, .. } => self.check_feature_budget(&feature_id),
            ManagerEvent::SpawnRequested { feature_id, request } => self.handle_spawn(feature_id, request),
            ManagerEvent::Finished { feature_id, outcome } => self.handle_finished(feature_id, outcome),
        }
    }

    fn check_feature_budget(&self, feature_id: &str) {
        let Some(feature) = self.tree.get(feature_id) else { return };
        let Some(accumulator) = self.tree.accumulator(feature_id) else { return };
        let usage = accumulator.snapshot();

        let mut run_state = self.run_state.lock().expect("run state lock poisoned");
        if let Some(state) = run_state.get_mut(feature_id) {
            if let Some(budget) = feature.token_budget {
                let (_, signal) = state.budget.check(usage.total() as f64, budget as f64);
                if signal.is_some() {
                    tracing::warn!(feature_id, total = usage.total(), budget, "feature token budget signal");
                }
            }
        }
        drop(run_state);

        self.check_global_budget();
    }

    fn check_global_budget(&self) {
        let Some(token_budget) = self.config.global_token_budget else { return };
        let roots = self.roots.lock().expect("roots lock poisoned").clone();
        let total: i64 = roots.iter().map(|id| self.tree.total_token_usage(id).total()).sum();

        let mut global = self.global_budget.lock().expect("global budget lock poisoned");
        let (_, signal) = global.check(total as f64, token_budget as f64);
        if let Some(signal) = signal {
            tracing::warn!(total, token_budget, ?signal, "global budget signal; further starts gated on acknowledgement");
        }
    }

    fn handle_spawn(&self, parent_id: String, request: SpawnRequest) {
        let child = match self.tree.spawn(&parent_id, &request) {
            Ok(child) => child,
            Err(error) => {
                tracing::warn!(parent_id, %error, "spawn rejected");
                return;
            }
        };

        self.pending_children.lock().expect("pending children lock poisoned").entry(parent_id).or_default().insert(child.id.clone());
        self.spawn_requests.lock().expect("spawn requests lock poisoned").insert(child.id.clone(), request);
        self.save_progress();
        self.start_feature(child.id);
    }

    fn handle_finished(&self, feature_id: String, outcome: WorkerOutcome) {
        let (status, error_text) = match outcome {
            WorkerOutcome::Completed => (FeatureStatus::Completed, None),
            WorkerOutcome::Stopped => (FeatureStatus::Stopped, None),
            WorkerOutcome::Failed { reason } => (FeatureStatus::Failed, Some(reason)),
        };

        let Ok(spawn_result) = self.tree.complete(&feature_id, status, format!("{status:?}"), error_text.clone(), Utc::now()) else {
            return;
        };

        let Some(feature) = self.tree.get(&feature_id) else {
            self.save_progress();
            return;
        };

        if let Some(parent_id) = feature.parent_id.clone() {
            self.handle_child_finished(&parent_id, &feature_id, status, error_text, &spawn_result);
        }

        self.save_progress();
    }

    fn handle_child_finished(
        &self,
        parent_id: &str,
        child_id: &str,
        status: FeatureStatus,
        error_text: Option<String>,
        spawn_result: &conductor_tree::SpawnResult,
    ) {
        if let Some(children) = self.pending_children.lock().expect("pending children lock poisoned").get_mut(parent_id) {
            children.remove(child_id);
        }

        if status != FeatureStatus::Failed {
            let context = generate_result_context(spawn_result);
            let _ = self.process.inject(parent_id, context);
            return;
        }

        let Some(parent) = self.tree.get(parent_id) else { return };
        let original_request = self
            .spawn_requests
            .lock()
            .expect("spawn requests lock poisoned")
            .get(child_id)
            .cloned()
            .unwrap_or_else(|| SpawnRequest { title: spawn_result.title.clone(), tasks: Vec::new(), model: None, description: None, max_depth: None });

        let failure = FailureInfo::new("execution_error", error_text.unwrap_or_default(), true);
        let result = self.fault.record_failure(parent_id, child_id, &spawn_result.title, parent.isolation_level, failure, original_request, None);

        match result.action {
            FailureAction::Abort => {
                let _ = self.tree.update(parent_id, |f| {
                    f.status = FeatureStatus::Failed;
                    f.last_error = Some(conductor_fault::FaultIsolationEngine::abort_reason(child_id));
                    f.completed_at = Some(Utc::now());
                });
                let _ = self.process.stop(parent_id);
            }
            FailureAction::Retry | FailureAction::Handle => {
                if result.failure.can_retry() {
                    if let Ok(spawn_request) = self.fault.retry(parent_id, child_id, None) {
                        self.spawn_requests.lock().expect("spawn requests lock poisoned").insert(child_id.to_string(), spawn_request);
                        if self.tree.update(child_id, |f| f.reset_for_retry()).is_ok() {
                            self.pending_children.lock().expect("pending children lock poisoned").entry(parent_id.to_string()).or_default().insert(child_id.to_string());
                            self.start_feature(child_id.to_string());
                        }
                        return;
                    }
                }
                self.fault.skip(parent_id, child_id, "max retries exceeded");
            }
            FailureAction::Skip => {
                self.fault.skip(parent_id, child_id, "skipped by fault isolation policy");
            }
        }

        if let Some(summary) = self.fault.generate_failure_summary(parent_id) {
            let _ = self.process.inject(parent_id, summary);
        }
    }

    fn save_progress(&self) {
        let roots = self.roots.lock().expect("roots lock poisoned").clone();
        let run_state = self.run_state.lock().expect("run state lock poisoned");
        let needs_ack = self.global_budget.lock().expect("global budget lock poisoned").needs_acknowledgement();

        let mut all_ids: Vec<String> = Vec::new();
        for root in &roots {
            collect_subtree_ids(&self.tree, root, &mut all_ids);
        }

        let _ = self.progress.update(|snapshot| {
            snapshot.global_state.needs_acknowledgement = needs_ack;
            for id in &all_ids {
                let Some(feature) = self.tree.get(id) else { continue };
                let failed_children = self.fault.failed_children(id);
                let mut state = FeatureState::from(feature);
                if let Some(run) = run_state.get(id) {
                    state.feature.current_model = run.selector.current_model();
                    state.feature.model_switches = run.selector.switches();
                }
                state.failed_children = failed_children;
                snapshot.upsert_feature(state, Utc::now());
            }
        });
    }
}

fn collect_subtree_ids(tree: &FeatureTree, id: &str, out: &mut Vec<String>) {
    out.push(id.to_string());
    for child in tree.children_of(id) {
        collect_subtree_ids(tree, &child, out);
    }
}

fn build_root_prompt(feature: &Feature) -> String {
    let mut out = format!("# {}\n", feature.title);
    if !feature.description.is_empty() {
        out.push('\n');
        out.push_str(&feature.description);
        out.push('\n');
    }
    if !feature.tasks.is_empty() {
        out.push_str("\n## Tasks\n");
        for task in &feature.tasks {
            out.push_str(&format!("- {}\n", task.description));
        }
    }
    out
}
