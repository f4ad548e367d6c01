//! Subprocess launch, per-stream line readers, and the reaper (§4.9).
//!
//! Grounded directly on `exec/shell/src/executor.rs`'s
//! `tokio::process::Command` + `kill_on_drop(true)` + `tokio::select!`
//! race pattern, generalized from byte-buffer capture to a capped
//! line-oriented reader because the worker protocol is newline-delimited
//! JSON rather than raw shell output (§4.9 "buffered to 1 MiB per line").

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use chrono::Utc;
use conductor_model_selector::Selector;
use conductor_protocol::stream_event::StreamEvent;
use conductor_tree::FeatureTree;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::INJECT_CHANNEL_CAPACITY;
use crate::ManagerEvent;
use crate::WorkerOutcome;
use crate::heuristic;

/// Per-line read cap (§4.9 "buffered to 1 MiB per line"). A worker that
/// emits a line past this is not killed; the line is truncated at the cap
/// and the remainder up to the next newline is discarded.
const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Reads one line, capped at [`MAX_LINE_BYTES`], from a buffered reader.
/// Returns `Ok(None)` at EOF with nothing left to return.
async fn read_line_capped<R>(reader: &mut R, scratch: &mut Vec<u8>) -> std::io::Result<Option<Vec<u8>>>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    scratch.clear();
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            return Ok(if scratch.is_empty() { None } else { Some(std::mem::take(scratch)) });
        }
        if let Some(pos) = available.iter().position(|&b| b == b'\n') {
            if scratch.len() < MAX_LINE_BYTES {
                let keep = pos.min(MAX_LINE_BYTES - scratch.len());
                scratch.extend_from_slice(&available[..keep]);
            }
            reader.consume(pos + 1);
            return Ok(Some(std::mem::take(scratch)));
        }
        let consumed = available.len();
        if scratch.len() < MAX_LINE_BYTES {
            let keep = consumed.min(MAX_LINE_BYTES - scratch.len());
            scratch.extend_from_slice(&available[..keep]);
        }
        reader.consume(consumed);
    }
}

pub struct LaunchRequest {
    pub feature_id: String,
    pub command: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Spawns the worker subprocess, a stdin writer, its two output reader
/// tasks, and a reaper that waits for exit and reports the outcome.
/// Returns the sender half of the worker's stdin-injection channel (§6
/// "Injected replies to worker"); the caller stores it to push the next
/// turn's Markdown onto the worker's stdin later.
pub fn launch(
    request: LaunchRequest,
    tree: Arc<FeatureTree>,
    selector: Selector,
    cancel: CancellationToken,
    events_tx: mpsc::Sender<ManagerEvent>,
    on_finished: impl FnOnce() + Send + 'static,
) -> mpsc::Sender<String> {
    let (inject_tx, inject_rx) = mpsc::channel(INJECT_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        run(request, tree, selector, cancel, events_tx, inject_rx).await;
        on_finished();
    });
    inject_tx
}

async fn run(
    request: LaunchRequest,
    tree: Arc<FeatureTree>,
    selector: Selector,
    cancel: CancellationToken,
    events_tx: mpsc::Sender<ManagerEvent>,
    mut inject_rx: mpsc::Receiver<String>,
) {
    let feature_id = request.feature_id.clone();

    let child = Command::new(&request.command)
        .args(&request.args)
        .current_dir(&request.cwd)
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .kill_on_drop(true)
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(error) => {
            tracing::error!(feature_id, %error, "failed to spawn worker");
            let _ = events_tx.try_send(ManagerEvent::Finished {
                feature_id,
                outcome: WorkerOutcome::Failed { reason: format!("failed to spawn: {error}") },
            });
            return;
        }
    };

    let stdin_handle = child.stdin.take().map(|mut stdin| {
        tokio::spawn(async move {
            while let Some(text) = inject_rx.recv().await {
                if stdin.write_all(text.as_bytes()).await.is_err() {
                    break;
                }
                if stdin.write_all(b"\n").await.is_err() {
                    break;
                }
                if stdin.flush().await.is_err() {
                    break;
                }
            }
        })
    });

    let saw_error = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let stdout_text = Arc::new(StdMutex::new(String::new()));

    let stdout_handle = child.stdout.take().map(|stdout| {
        spawn_reader(stdout, feature_id.clone(), tree.clone(), selector.clone(), events_tx.clone(), saw_error.clone(), Some(stdout_text.clone()))
    });
    let stderr_handle = child
        .stderr
        .take()
        .map(|stderr| spawn_reader(stderr, feature_id.clone(), tree.clone(), selector.clone(), events_tx.clone(), saw_error.clone(), None));

    let outcome = tokio::select! {
        () = cancel.cancelled() => {
            drop(child);
            WorkerOutcome::Stopped
        }
        status = child.wait() => {
            match status {
                Ok(status) if status.success() => {
                    if heuristic::looks_like_test_failure(&stdout_text.lock().expect("stdout buffer lock poisoned")) {
                        WorkerOutcome::Failed { reason: "test failures detected in worker output".to_string() }
                    } else if saw_error.load(std::sync::atomic::Ordering::SeqCst) {
                        WorkerOutcome::Failed { reason: "worker reported an error event".to_string() }
                    } else {
                        WorkerOutcome::Completed
                    }
                }
                Ok(status) => WorkerOutcome::Failed { reason: format!("worker exited with status {status}") },
                Err(error) => WorkerOutcome::Failed { reason: format!("failed to wait on worker: {error}") },
            }
        }
    };

    if let Some(handle) = stdout_handle {
        let _ = handle.await;
    }
    if let Some(handle) = stderr_handle {
        let _ = handle.await;
    }
    if let Some(handle) = stdin_handle {
        handle.abort();
    }

    tracing::info!(feature_id, ?outcome, "worker finished");
    let _ = events_tx.try_send(ManagerEvent::Finished { feature_id, outcome });
}

/// Reads one piped stream line-by-line, parsing each line and fanning the
/// resulting event out to the selector (C4), the tree's per-feature
/// tracker (C2/C3/C7), and the manager's event channel. Never blocks on
/// the channel send — a full channel just drops the output event (§5
/// "Readers only push events; they never take scheduler locks"; §6 bounded
/// drop-oldest semantics).
fn spawn_reader<R>(
    stream: R,
    feature_id: String,
    tree: Arc<FeatureTree>,
    selector: Selector,
    events_tx: mpsc::Sender<ManagerEvent>,
    saw_error: Arc<std::sync::atomic::AtomicBool>,
    accumulate_into: Option<Arc<StdMutex<String>>>,
) -> tokio::task::JoinHandle<()>
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut scratch = Vec::new();
        loop {
            match read_line_capped(&mut reader, &mut scratch).await {
                Ok(Some(raw)) => {
                    let line = String::from_utf8_lossy(&raw).into_owned();

                    if let Some(buffer) = &accumulate_into {
                        let mut buffer = buffer.lock().expect("stdout buffer lock poisoned");
                        buffer.push_str(&line);
                        buffer.push('\n');
                    }

                    let event = conductor_parser::parse_line(&line);
                    if matches!(event, StreamEvent::Error { .. }) {
                        saw_error.store(true, std::sync::atomic::Ordering::SeqCst);
                    }

                    selector.handle_event(&event);

                    match tree.ingest(&feature_id, &event, Utc::now()) {
                        Ok(Some(request)) => {
                            let _ = events_tx.try_send(ManagerEvent::SpawnRequested { feature_id: feature_id.clone(), request });
                        }
                        Ok(None) => {}
                        Err(error) => {
                            tracing::warn!(feature_id = %feature_id, %error, "rejected spawn request");
                        }
                    }

                    let _ = events_tx.try_send(ManagerEvent::Output { feature_id: feature_id.clone(), event });
                }
                Ok(None) => break,
                Err(error) => {
                    tracing::warn!(feature_id = %feature_id, %error, "error reading worker output, stopping reader");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
#[path = "launch.test.rs"]
mod tests;
