//! Errors surfaced by the fault isolation engine (§7 Child category).

use conductor_error::ErrorExt;
use conductor_error::StatusCode;
use snafu::Snafu;

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub))]
pub enum FaultError {
    #[snafu(display("no recorded failure for child {child_id}"))]
    NoSuchFailure { child_id: String },
}

impl ErrorExt for FaultError {
    fn status_code(&self) -> StatusCode {
        match self {
            FaultError::NoSuchFailure { .. } => StatusCode::ChildFailed,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
