//! Per-category target derivation (§4.3).

use conductor_parser::truncate::COMMAND_CEILING;
use conductor_parser::truncate::truncate_with_ellipsis;
use serde_json::Value;

fn str_field<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    input.get(key).and_then(Value::as_str)
}

/// Shortens a path to `.../<parent>/<file>` when it has more than three
/// `/`-separated segments; returns it unchanged otherwise (§4.3).
pub fn shorten_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() > 3 {
        let tail = &segments[segments.len() - 2..];
        format!(".../{}", tail.join("/"))
    } else {
        path.to_string()
    }
}

pub fn command_target(input: &Value) -> String {
    let command = str_field(input, "command").unwrap_or_default();
    truncate_with_ellipsis(command, COMMAND_CEILING)
}

pub fn file_target(input: &Value) -> String {
    let path = str_field(input, "file_path")
        .or_else(|| str_field(input, "path"))
        .unwrap_or_default();
    shorten_path(path)
}

pub fn web_fetch_target(input: &Value) -> String {
    str_field(input, "url")
        .or_else(|| str_field(input, "query"))
        .unwrap_or_default()
        .to_string()
}

pub fn agent_target(input: &Value) -> String {
    if let Some(subagent_type) = str_field(input, "subagent_type") {
        let description = str_field(input, "description").unwrap_or_default();
        let description = truncate_with_ellipsis(description, COMMAND_CEILING);
        return format!("{subagent_type}: {description}");
    }
    str_field(input, "prompt").unwrap_or_default().to_string()
}

pub fn search_target(input: &Value) -> String {
    let pattern = str_field(input, "pattern").unwrap_or_default();
    let path = str_field(input, "path").unwrap_or(".");
    format!("{pattern} in {}", shorten_path(path))
}

#[cfg(test)]
#[path = "target.test.rs"]
mod tests;
