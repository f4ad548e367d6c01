//! Worker Process Manager (C9, §4.9).
//!
//! Launches, supervises, streams, stops, and reaps the external worker
//! subprocesses that execute features. Grounded directly on
//! `exec/shell/src/executor.rs`'s spawn/race/reap shape, generalized from
//! byte-buffer shell capture to line-oriented newline-delimited JSON
//! streaming (§4.9).

pub mod error;
pub mod heuristic;
mod launch;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use conductor_model_selector::Selector;
use conductor_protocol::spawn::SpawnRequest;
use conductor_protocol::stream_event::StreamEvent;
use conductor_tree::FeatureTree;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub use error::ProcessError;
use launch::LaunchRequest;

/// Bounded output-channel capacity (§5, §6: "Output channel is bounded
/// (default 100)").
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Bounded capacity of a worker's stdin-injection channel (§6 "Injected
/// replies to worker").
pub const INJECT_CHANNEL_CAPACITY: usize = 16;

/// Flags invariant across every worker invocation (§6): bypass
/// interactive permission prompts, verbose structured output, and
/// newline-delimited JSON as the output format.
const AUTO_APPROVE_FLAG: &str = "--skip-permissions";
const VERBOSE_FLAG: &str = "--verbose";
const OUTPUT_FORMAT_FLAG: &str = "--output-format";
const OUTPUT_FORMAT_VALUE: &str = "stream-json";
const MODEL_FLAG: &str = "--model";

/// How a supervised worker ended (§4.9 lifecycle).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerOutcome {
    Completed,
    Failed { reason: String },
    Stopped,
}

/// Everything fanned out of a running worker to its subscriber (normally
/// the scheduler, §4.10): per-line parsed events, detected spawn
/// requests, and the terminal outcome.
#[derive(Debug, Clone)]
pub enum ManagerEvent {
    Output { feature_id: String, event: StreamEvent },
    SpawnRequested { feature_id: String, request: SpawnRequest },
    Finished { feature_id: String, outcome: WorkerOutcome },
}

/// Everything needed to launch one worker (§6 "worker command line").
pub struct StartRequest {
    pub feature_id: String,
    pub cwd: PathBuf,
    pub prompt: String,
    /// Concrete model identifier for the feature's current tier, or
    /// `None` to omit the flag entirely (§6 "passed only when
    /// non-default").
    pub model: Option<String>,
}

struct Instance {
    cancel: CancellationToken,
    inject: mpsc::Sender<String>,
}

/// Launches, supervises, and reaps worker subprocesses, enforcing a
/// max-concurrency cap and one-instance-per-feature invariant (§4.9).
pub struct ProcessManager {
    worker_command: String,
    max_concurrency: usize,
    instances: Arc<Mutex<HashMap<String, Instance>>>,
    events_tx: mpsc::Sender<ManagerEvent>,
}

impl ProcessManager {
    /// Builds a manager bound to `worker_command`, returning the receiver
    /// half of its bounded event channel.
    pub fn new(worker_command: impl Into<String>, max_concurrency: usize) -> (Self, mpsc::Receiver<ManagerEvent>) {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (
            Self {
                worker_command: worker_command.into(),
                max_concurrency,
                instances: Arc::new(Mutex::new(HashMap::new())),
                events_tx,
            },
            events_rx,
        )
    }

    pub fn running_count(&self) -> usize {
        self.instances.lock().expect("process manager lock poisoned").len()
    }

    pub fn is_running(&self, feature_id: &str) -> bool {
        self.instances.lock().expect("process manager lock poisoned").contains_key(feature_id)
    }

    /// Starts a worker for `request`, refusing when the concurrency cap is
    /// reached or a worker is already running for this feature (§4.9
    /// "Concurrency cap").
    pub fn start(&self, request: StartRequest, tree: Arc<FeatureTree>, selector: Selector) -> Result<(), ProcessError> {
        {
            let instances = self.instances.lock().expect("process manager lock poisoned");
            if instances.len() >= self.max_concurrency {
                return Err(error::MaxConcurrencyReachedSnafu { limit: self.max_concurrency }.build());
            }
            if instances.contains_key(&request.feature_id) {
                return Err(error::AlreadyRunningSnafu { feature_id: request.feature_id.clone() }.build());
            }
        }

        let cancel = CancellationToken::new();
        let args = build_args(request.model.as_deref(), &request.prompt);
        let feature_id = request.feature_id.clone();
        tracing::info!(feature_id, command = %self.worker_command, "starting worker");

        let on_finished_instances = self.instances.clone();
        let on_finished_id = feature_id.clone();
        let inject = launch::launch(
            LaunchRequest { feature_id: feature_id.clone(), command: self.worker_command.clone(), args, cwd: request.cwd },
            tree,
            selector,
            cancel.clone(),
            self.events_tx.clone(),
            move || {
                on_finished_instances.lock().expect("process manager lock poisoned").remove(&on_finished_id);
            },
        );

        self.instances.lock().expect("process manager lock poisoned").insert(feature_id, Instance { cancel, inject });

        Ok(())
    }

    /// Pushes Markdown onto a running worker's stdin as its next turn
    /// (§6 "Injected replies to worker" — sub-feature results and child
    /// failure summaries). Silently drops the text if the worker has
    /// already finished or its stdin channel is full — injections are
    /// best-effort, never blocking.
    pub fn inject(&self, feature_id: &str, text: String) -> Result<(), ProcessError> {
        let instances = self.instances.lock().expect("process manager lock poisoned");
        let instance = instances
            .get(feature_id)
            .ok_or_else(|| error::NotRunningSnafu { feature_id: feature_id.to_string() }.build())?;
        let _ = instance.inject.try_send(text);
        Ok(())
    }

    /// Cooperatively cancels the worker for `feature_id` (§5
    /// cancellation). The reaper observes the cancellation and reports
    /// `WorkerOutcome::Stopped`.
    pub fn stop(&self, feature_id: &str) -> Result<(), ProcessError> {
        let instances = self.instances.lock().expect("process manager lock poisoned");
        let instance = instances
            .get(feature_id)
            .ok_or_else(|| error::NotRunningSnafu { feature_id: feature_id.to_string() }.build())?;
        instance.cancel.cancel();
        Ok(())
    }

    /// Cancels every running worker (§4.10 "Scheduler cancellation
    /// cascades to `StopAll`").
    pub fn stop_all(&self) {
        let instances = self.instances.lock().expect("process manager lock poisoned");
        for instance in instances.values() {
            instance.cancel.cancel();
        }
    }
}

/// Builds the invariant worker command-line arguments (§6): permission
/// bypass, verbose structured output, ndjson format, the model tier (only
/// when given), and the prompt as the final argument.
fn build_args(model: Option<&str>, prompt: &str) -> Vec<String> {
    let mut args = vec![
        AUTO_APPROVE_FLAG.to_string(),
        VERBOSE_FLAG.to_string(),
        OUTPUT_FORMAT_FLAG.to_string(),
        OUTPUT_FORMAT_VALUE.to_string(),
    ];
    if let Some(model) = model {
        args.push(MODEL_FLAG.to_string());
        args.push(model.to_string());
    }
    args.push(prompt.to_string());
    args
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
