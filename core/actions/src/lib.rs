//! Action Extractor (C3, §4.3).
//!
//! Classifies a `ToolUse` event's tool name into an action category and
//! derives a short, human-scannable target string from its input. Tools
//! that are deliberately dropped (never surfaced as actions) or that
//! signal a sub-feature spawn (handled separately by the Recursive
//! Feature Tree, §4.7) classify to `None`.

mod target;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

/// Name of the tool that triggers a recursive spawn request (§4.1, §6). Not
/// a plain action category.
pub const SPAWN_TOOL_NAME: &str = "ralph_spawn_feature";

/// One of the categories an action classifies into (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Agent,
    WebFetch,
    Command,
    FileModify,
    FileRead,
    Search,
}

/// A classified tool invocation (§4.3).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub name: String,
    pub target: String,
    pub timestamp: DateTime<Utc>,
}

/// Classifies a `ToolUse { tool, input }` event into an [`Action`].
///
/// Returns `None` ("a non-action, filtered") for tools deliberately
/// dropped from action tracking (`TodoWrite`, `WebSearch`,
/// `AskUserQuestion`, `Skill`, `NotebookEdit`), for the spawn-request tool
/// (which the Recursive Feature Tree tracker handles directly), and for
/// any tool name this classifier doesn't recognize.
pub fn classify(tool: &str, input: &Value, timestamp: DateTime<Utc>) -> Option<Action> {
    let lower = tool.to_lowercase();

    if lower == SPAWN_TOOL_NAME {
        return None;
    }

    let dropped = matches!(
        lower.as_str(),
        "todowrite" | "websearch" | "askuserquestion" | "skill" | "notebookedit"
    );
    if dropped {
        tracing::trace!(tool, "tool deliberately dropped from action tracking");
        return None;
    }

    let (action_type, derive_target): (ActionType, fn(&Value) -> String) = match lower.as_str() {
        "task" | "agent" => (ActionType::Agent, target::agent_target),
        "webfetch" => (ActionType::WebFetch, target::web_fetch_target),
        "bash" => (ActionType::Command, target::command_target),
        "write" | "edit" => (ActionType::FileModify, target::file_target),
        "read" => (ActionType::FileRead, target::file_target),
        "glob" | "grep" => (ActionType::Search, target::search_target),
        _ => {
            tracing::trace!(tool, "unrecognized tool, no action classification");
            return None;
        }
    };

    Some(Action {
        action_type,
        name: tool.to_string(),
        target: derive_target(input),
        timestamp,
    })
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
