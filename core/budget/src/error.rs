//! Budget parsing error, classified through the shared status-code
//! taxonomy (§7 Validation category).

use conductor_error::ErrorExt;
use conductor_error::StatusCode;
use snafu::Snafu;

use crate::parse::BudgetParseError as RawParseError;

/// Error parsing a budget string from PRD metadata (§6).
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display("invalid budget {input:?}: {reason}"))]
pub struct BudgetError {
    input: String,
    reason: &'static str,
}

impl From<RawParseError> for BudgetError {
    fn from(err: RawParseError) -> Self {
        let (input, reason) = match err {
            RawParseError::Unparsable(input) => (input, "not a recognized budget syntax"),
            RawParseError::NonPositive(input) => (input, "budget must be strictly positive"),
        };
        BudgetError { input, reason }
    }
}

impl ErrorExt for BudgetError {
    fn status_code(&self) -> StatusCode {
        StatusCode::InvalidBudget
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
