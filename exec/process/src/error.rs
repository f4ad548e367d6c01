//! Errors surfaced by the worker process manager (§7 Worker category).

use conductor_error::ErrorExt;
use conductor_error::StatusCode;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProcessError {
    #[snafu(display("max concurrency ({limit}) reached"))]
    MaxConcurrencyReached { limit: usize },

    #[snafu(display("a worker is already running for feature {feature_id}"))]
    AlreadyRunning { feature_id: String },

    #[snafu(display("failed to spawn worker for feature {feature_id}: {source}"))]
    Spawn { feature_id: String, source: std::io::Error },

    #[snafu(display("no running worker for feature {feature_id}"))]
    NotRunning { feature_id: String },
}

impl ErrorExt for ProcessError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProcessError::MaxConcurrencyReached { .. } => StatusCode::MaxConcurrentReached,
            ProcessError::AlreadyRunning { .. } => StatusCode::AlreadyRunning,
            ProcessError::Spawn { .. } => StatusCode::SpawnFailed,
            ProcessError::NotRunning { .. } => StatusCode::WorkerNotRunning,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
