//! `SpawnRequest` (§3) — a running worker's request to create a child
//! feature, and its wire form (`ralph_spawn_feature` tool input, §6).

use serde::Deserialize;
use serde::Serialize;

use crate::feature::ModelTier;

/// A validated request to spawn a child feature, produced by C7's tracker
/// from a `ralph_spawn_feature` tool use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub model: Option<ModelTier>,
    #[serde(default)]
    pub description: Option<String>,
    /// Overrides the child's max-depth cap if `Some` and greater than 0.
    #[serde(default)]
    pub max_depth: Option<i32>,
}

/// Wire payload of a `ralph_spawn_feature` tool_use's `tool_input` (§6).
#[derive(Debug, Clone, Deserialize)]
pub struct SpawnToolInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_depth: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Error parsing or validating a spawn payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnValidationError {
    /// The `tool_input` JSON could not be deserialized at all.
    Unparsable,
    /// The title is missing or empty.
    EmptyTitle,
}

impl SpawnRequest {
    /// Parses and validates a raw `tool_input` JSON blob into a
    /// `SpawnRequest`, per §4.7 ("`ErrInvalidSpawnData` if the payload is
    /// unparseable or lacks a title").
    pub fn from_tool_input(value: &serde_json::Value) -> Result<SpawnRequest, SpawnValidationError> {
        let input: SpawnToolInput =
            serde_json::from_value(value.clone()).map_err(|_| SpawnValidationError::Unparsable)?;

        let title = input.title.unwrap_or_default();
        if title.trim().is_empty() {
            return Err(SpawnValidationError::EmptyTitle);
        }

        let model = input.model.as_deref().and_then(parse_tier);

        Ok(SpawnRequest {
            title,
            tasks: input.tasks,
            model,
            description: input.description,
            max_depth: input.max_depth,
        })
    }
}

fn parse_tier(s: &str) -> Option<ModelTier> {
    match s.to_lowercase().as_str() {
        "haiku" | "cheap" => Some(ModelTier::Cheap),
        "sonnet" | "mid" => Some(ModelTier::Mid),
        "opus" | "premium" => Some(ModelTier::Premium),
        _ => None,
    }
}

#[cfg(test)]
#[path = "spawn.test.rs"]
mod tests;
