//! Errors surfaced by the feature scheduler (§7 Policy/Resource categories).

use conductor_error::ErrorExt;
use conductor_error::StatusCode;
use conductor_progress::ProgressError;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SchedulerError {
    #[snafu(display("feature {id} not found"))]
    FeatureNotFound { id: String },

    #[snafu(display("global budget needs acknowledgement before further workers may start"))]
    BudgetNeedsAcknowledgement,

    #[snafu(display("no auto-mode run is currently active"))]
    NotRunning,

    #[snafu(display("failed to load progress snapshot: {source}"))]
    Progress { source: ProgressError },
}

impl ErrorExt for SchedulerError {
    fn status_code(&self) -> StatusCode {
        match self {
            SchedulerError::FeatureNotFound { .. } => StatusCode::FeatureNotFound,
            SchedulerError::BudgetNeedsAcknowledgement => StatusCode::BudgetNeedsAcknowledgement,
            SchedulerError::NotRunning => StatusCode::Unsupported,
            SchedulerError::Progress { .. } => StatusCode::IoError,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
