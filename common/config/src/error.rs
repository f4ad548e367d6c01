//! Config-loading errors (§4.13, §7 "ambient/IO-adjacent crates use a
//! flatter `thiserror` enum").

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("failed to parse config file {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },

    #[error("invalid value for {field}: {detail}")]
    InvalidValue { field: &'static str, detail: String },
}

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
