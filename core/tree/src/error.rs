//! Errors surfaced by the recursive feature tree (§6, §7).

use conductor_error::ErrorExt;
use conductor_error::StatusCode;
use snafu::Snafu;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum TreeError {
    #[snafu(display("feature {id} not found"))]
    FeatureNotFound { id: String },

    #[snafu(display("parent feature {id} is not running"))]
    ParentNotRunning { id: String },

    #[snafu(display("feature {id} is already at its max depth"))]
    MaxDepthExceeded { id: String },

    #[snafu(display("invalid spawn data: {reason}"))]
    InvalidSpawnData { reason: String },
}

impl ErrorExt for TreeError {
    fn status_code(&self) -> StatusCode {
        match self {
            TreeError::FeatureNotFound { .. } => StatusCode::FeatureNotFound,
            TreeError::ParentNotRunning { .. } => StatusCode::ParentNotRunning,
            TreeError::MaxDepthExceeded { .. } => StatusCode::MaxDepthExceeded,
            TreeError::InvalidSpawnData { .. } => StatusCode::InvalidSpawnData,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
