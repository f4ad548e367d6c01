//! Shared error trait and helpers used by every component crate's local
//! error enum.

use std::error::Error as StdError;
use std::fmt;

use crate::StatusCode;

/// A source-location capture, attached to error variants via
/// `#[snafu(implicit)] location: Location` in component crates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    #[track_caller]
    pub fn caller() -> Self {
        let loc = std::panic::Location::caller();
        Self {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Extension trait implemented by every component's error enum.
///
/// Gives callers a uniform way to classify an error (retryable? should it be
/// logged? what status code?) without matching on the concrete type.
pub trait ErrorExt: StdError {
    /// The status code classifying this error.
    fn status_code(&self) -> StatusCode;

    /// Downcast support for callers that need the concrete type back.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Whether the failure this error represents can be retried.
    fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }

    /// Whether the failure should be logged at `error` level.
    fn should_log_error(&self) -> bool {
        self.status_code().should_log_error()
    }

    /// A message safe to show a user/operator: internal-category errors are
    /// redacted to just the status code, everything else passes through.
    fn output_msg(&self) -> String {
        use crate::StatusCategory;
        match self.status_code().category() {
            StatusCategory::Common if self.status_code() == StatusCode::Internal => {
                format!("Internal error: {}", StatusCode::Internal as i32)
            }
            _ => self.to_string(),
        }
    }
}

/// A minimal `ErrorExt` implementation for ad hoc error construction, used
/// in tests and at crate boundaries where wrapping a whole enum variant
/// isn't warranted.
#[derive(Debug)]
pub struct PlainError {
    message: String,
    status_code: StatusCode,
}

impl PlainError {
    pub fn new(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for PlainError {}

impl ErrorExt for PlainError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// A boxed source error annotated with a status code, for wrapping
/// third-party errors (e.g. `std::io::Error`) at a crate boundary.
#[derive(Debug)]
pub struct BoxedError {
    source: Box<dyn StdError + Send + Sync>,
    status_code: StatusCode,
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.source.as_ref())
    }
}

impl ErrorExt for BoxedError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Wraps any `std::error::Error` with a status code.
pub fn boxed(
    source: impl StdError + Send + Sync + 'static,
    status_code: StatusCode,
) -> BoxedError {
    BoxedError {
        source: Box::new(source),
        status_code,
    }
}

#[cfg(test)]
#[path = "ext.test.rs"]
mod tests;
