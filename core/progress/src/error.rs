//! Errors surfaced by the progress store (§7, IO category).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("failed to read progress snapshot at {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse progress snapshot at {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("failed to write progress snapshot to {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("failed to persist progress snapshot ({from} -> {to}): {source}")]
    Rename { from: PathBuf, to: PathBuf, source: std::io::Error },
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
