//! Flattens the polymorphic `content`/`message` shape (a plain string, or
//! an array of typed blocks) into a single text string (§4.1, §9 "Dynamic
//! message shapes").

use serde_json::Value;

/// Extracts a flat text representation from a `content` value that is
/// either a plain string or an array of `{type, ...}` blocks.
///
/// Textual blocks (`type: "text"`) are concatenated with single spaces.
/// `tool_use` blocks are replaced with a `[Tool: name]` placeholder so a
/// downstream content classifier (keyword matching, the Auto Model
/// Selector) still observes the tool signal even though the call itself
/// isn't rendered. `tool_result` blocks contribute their own text content,
/// if any. Anything else is ignored.
pub fn extract_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(blocks) => {
            let parts: Vec<String> = blocks.iter().filter_map(block_text).collect();
            parts.join(" ")
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn block_text(block: &Value) -> Option<String> {
    let block_type = block.get("type").and_then(Value::as_str).unwrap_or("");
    match block_type {
        "text" => block
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_string),
        "tool_use" => {
            let name = block.get("name").and_then(Value::as_str).unwrap_or("tool");
            Some(format!("[Tool: {name}]"))
        }
        "tool_result" => block
            .get("content")
            .map(extract_text)
            .filter(|s| !s.is_empty()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "content.test.rs"]
mod tests;
