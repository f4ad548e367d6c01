//! Environment-variable layer (§4.13): `CONDUCTOR_*` variables, applied
//! after `conductor.toml` and before explicit CLI flags.

use std::collections::HashMap;

use crate::error::ConfigError;
use crate::types::Config;

const WORKER_COMMAND: &str = "CONDUCTOR_WORKER_COMMAND";
const MAX_CONCURRENCY: &str = "CONDUCTOR_MAX_CONCURRENCY";
const MAX_RETRIES: &str = "CONDUCTOR_MAX_RETRIES";
const MAX_DEPTH: &str = "CONDUCTOR_MAX_DEPTH";
const GLOBAL_TOKEN_BUDGET: &str = "CONDUCTOR_GLOBAL_TOKEN_BUDGET";
const GLOBAL_USD_BUDGET: &str = "CONDUCTOR_GLOBAL_USD_BUDGET";
const PROGRESS_PATH: &str = "CONDUCTOR_PROGRESS_PATH";

/// Applies `CONDUCTOR_*` environment variables found in `vars` onto
/// `config`. Takes a map (rather than reading `std::env` directly) so
/// tests don't need process-wide environment mutation (`common/config`'s
/// teacher counterpart exercises env loading the same way, via an
/// injected map).
pub fn apply_env(config: &mut Config, vars: &HashMap<String, String>) -> Result<(), ConfigError> {
    if let Some(value) = vars.get(WORKER_COMMAND) {
        config.worker_command = value.clone();
    }
    if let Some(value) = vars.get(MAX_CONCURRENCY) {
        config.max_concurrency = parse_env(MAX_CONCURRENCY, value)?;
    }
    if let Some(value) = vars.get(MAX_RETRIES) {
        config.max_retries = parse_env(MAX_RETRIES, value)?;
    }
    if let Some(value) = vars.get(MAX_DEPTH) {
        config.max_depth = parse_env(MAX_DEPTH, value)?;
    }
    if let Some(value) = vars.get(GLOBAL_TOKEN_BUDGET) {
        match conductor_budget::parse_budget(value) {
            Ok(conductor_budget::BudgetValue::Tokens(tokens)) => config.global_token_budget = Some(tokens),
            _ => {
                return Err(ConfigError::InvalidValue {
                    field: "CONDUCTOR_GLOBAL_TOKEN_BUDGET",
                    detail: value.clone(),
                });
            }
        }
    }
    if let Some(value) = vars.get(GLOBAL_USD_BUDGET) {
        match conductor_budget::parse_budget(value) {
            Ok(conductor_budget::BudgetValue::Usd(amount)) => config.global_usd_budget = Some(amount),
            Ok(conductor_budget::BudgetValue::Tokens(tokens)) => config.global_usd_budget = Some(tokens as f64),
            Err(_) => {
                return Err(ConfigError::InvalidValue {
                    field: "CONDUCTOR_GLOBAL_USD_BUDGET",
                    detail: value.clone(),
                });
            }
        }
    }
    if let Some(value) = vars.get(PROGRESS_PATH) {
        config.progress_path = value.clone();
    }
    Ok(())
}

/// Reads `CONDUCTOR_*` variables directly from the process environment.
pub fn env_snapshot() -> HashMap<String, String> {
    [WORKER_COMMAND, MAX_CONCURRENCY, MAX_RETRIES, MAX_DEPTH, GLOBAL_TOKEN_BUDGET, GLOBAL_USD_BUDGET, PROGRESS_PATH]
        .iter()
        .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
        .collect()
}

fn parse_env<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue { field, detail: value.to_string() })
}

#[cfg(test)]
#[path = "env_loader.test.rs"]
mod tests;
