//! Resolves layered configuration in ascending priority: built-in
//! defaults, `conductor.toml`, environment variables (§4.13). The CLI adds
//! a final, highest-priority layer of explicit flag overrides on top of
//! what this returns.

use std::path::Path;
use std::path::PathBuf;

use crate::env_loader;
use crate::error::ConfigError;
use crate::toml_config::TomlConfig;
use crate::types::Config;

pub const DEFAULT_CONFIG_FILE: &str = "conductor.toml";

/// Loads configuration from `toml_path` (if it exists) layered over
/// built-in defaults, then applies the process environment on top.
pub fn load(toml_path: &Path) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(overlay) = TomlConfig::load_from_path(toml_path)? {
        tracing::debug!(path = %toml_path.display(), "applying conductor.toml overlay");
        overlay.apply_to(&mut config)?;
    } else {
        tracing::debug!(path = %toml_path.display(), "no conductor.toml found, using built-in defaults");
    }

    let env = env_loader::env_snapshot();
    env_loader::apply_env(&mut config, &env)?;

    Ok(config)
}

/// `load` against the default `conductor.toml` in `dir`.
pub fn load_from_dir(dir: &Path) -> Result<Config, ConfigError> {
    load(&dir.join(DEFAULT_CONFIG_FILE))
}

pub fn default_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".conductor"))
}

#[cfg(test)]
#[path = "loader.test.rs"]
mod tests;
