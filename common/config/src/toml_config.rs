//! `conductor.toml` file layer (§4.13).
//!
//! Every field is optional; an absent field leaves the underlying layer's
//! value untouched, matching the teacher's general "every config layer is
//! a sparse overlay" convention (`common/config/src/config_builder.rs`).

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::ModelTierNames;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TomlModelTiers {
    pub cheap: Option<String>,
    pub mid: Option<String>,
    pub premium: Option<String>,
}

/// Sparse overlay parsed from `conductor.toml` (§4.13).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TomlConfig {
    pub worker_command: Option<String>,
    pub max_concurrency: Option<usize>,
    pub max_retries: Option<i32>,
    pub max_depth: Option<i32>,
    pub max_adjustments: Option<i32>,
    pub base_context_budget: Option<i64>,
    pub global_token_budget: Option<String>,
    pub global_usd_budget: Option<String>,
    #[serde(default)]
    pub model_tiers: TomlModelTiers,
    pub progress_path: Option<String>,
    pub legacy_progress_path: Option<String>,
}

impl TomlConfig {
    pub fn parse(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Reads and parses `path`, returning `Ok(None)` if the file doesn't
    /// exist at all (§4.11-style "missing file is not an error").
    pub fn load_from_path(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(source) => {
                let parsed = Self::parse(&source)
                    .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
                Ok(Some(parsed))
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
        }
    }

    pub fn apply_to(&self, config: &mut crate::types::Config) -> Result<(), ConfigError> {
        if let Some(value) = &self.worker_command {
            config.worker_command = value.clone();
        }
        if let Some(value) = self.max_concurrency {
            config.max_concurrency = value;
        }
        if let Some(value) = self.max_retries {
            config.max_retries = value;
        }
        if let Some(value) = self.max_depth {
            config.max_depth = value;
        }
        if let Some(value) = self.max_adjustments {
            config.max_adjustments = value;
        }
        if let Some(value) = self.base_context_budget {
            config.base_context_budget = value;
        }
        if let Some(raw) = &self.global_token_budget {
            config.global_token_budget = Some(parse_token_budget(raw)?);
        }
        if let Some(raw) = &self.global_usd_budget {
            config.global_usd_budget = Some(parse_usd_budget(raw)?);
        }
        if let Some(value) = &self.model_tiers.cheap {
            config.model_tiers.cheap = value.clone();
        }
        if let Some(value) = &self.model_tiers.mid {
            config.model_tiers.mid = value.clone();
        }
        if let Some(value) = &self.model_tiers.premium {
            config.model_tiers.premium = value.clone();
        }
        if let Some(value) = &self.progress_path {
            config.progress_path = value.clone();
        }
        if let Some(value) = &self.legacy_progress_path {
            config.legacy_progress_path = value.clone();
        }
        Ok(())
    }
}

fn parse_token_budget(raw: &str) -> Result<i64, ConfigError> {
    match conductor_budget::parse_budget(raw) {
        Ok(conductor_budget::BudgetValue::Tokens(tokens)) => Ok(tokens),
        Ok(conductor_budget::BudgetValue::Usd(_)) => {
            Err(ConfigError::InvalidValue { field: "global_token_budget", detail: raw.to_string() })
        }
        Err(_) => Err(ConfigError::InvalidValue { field: "global_token_budget", detail: raw.to_string() }),
    }
}

fn parse_usd_budget(raw: &str) -> Result<f64, ConfigError> {
    match conductor_budget::parse_budget(raw) {
        Ok(conductor_budget::BudgetValue::Usd(amount)) => Ok(amount),
        Ok(conductor_budget::BudgetValue::Tokens(tokens)) => Ok(tokens as f64),
        Err(_) => Err(ConfigError::InvalidValue { field: "global_usd_budget", detail: raw.to_string() }),
    }
}

#[cfg(test)]
#[path = "toml_config.test.rs"]
mod tests;
