//! Fixed truncation ceilings applied to text before it is handed to
//! downstream storage (§4.1).

/// Ceiling for bash commands and agent-spawn prompts.
pub const COMMAND_CEILING: usize = 100;
/// Ceiling for assistant free-text content.
pub const ASSISTANT_TEXT_CEILING: usize = 200;
/// Ceiling for tool-result text.
pub const TOOL_RESULT_CEILING: usize = 500;

const ELLIPSIS: &str = "...";

/// Truncates `text` to at most `ceiling` characters, appending an ellipsis
/// marker when truncation occurred. Operates on `char` boundaries so it
/// never panics on multi-byte UTF-8 input.
pub fn truncate_with_ellipsis(text: &str, ceiling: usize) -> String {
    if text.chars().count() <= ceiling {
        return text.to_string();
    }
    let kept: String = text.chars().take(ceiling).collect();
    format!("{kept}{ELLIPSIS}")
}

#[cfg(test)]
#[path = "truncate.test.rs"]
mod tests;
