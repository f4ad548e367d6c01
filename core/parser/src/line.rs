//! Per-line event construction (§4.1, §6).

use conductor_protocol::stream_event::RawLine;
use conductor_protocol::stream_event::RawUsage;
use conductor_protocol::stream_event::ResultSubtype;
use conductor_protocol::stream_event::StreamEvent;
use conductor_protocol::stream_event::UsageDelta;
use serde_json::Value;

use crate::content::extract_text;
use crate::truncate::ASSISTANT_TEXT_CEILING;
use crate::truncate::TOOL_RESULT_CEILING;
use crate::truncate::truncate_with_ellipsis;

/// Parses a single newline-terminated JSON record into a typed event.
///
/// Never fails: malformed JSON or an unrecognized `type` discriminator
/// becomes a `System { subtype: "raw", .. }` event carrying the original
/// line, per §4.1 ("malformed JSON never aborts ingestion").
pub fn parse_line(line: &str) -> StreamEvent {
    let raw: RawLine = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::trace!(%error, "worker line is not valid JSON, emitting raw event");
            return raw_event(line);
        }
    };

    match raw.line_type.to_lowercase().as_str() {
        "assistant" => {
            let text = truncate_with_ellipsis(&text_content(&raw), ASSISTANT_TEXT_CEILING);
            StreamEvent::Assistant {
                text,
                usage: merged_usage(&raw),
            }
        }
        "user" => StreamEvent::User {
            text: text_content(&raw),
        },
        "system" => StreamEvent::System {
            subtype: raw.subtype.clone().unwrap_or_else(|| "raw".to_string()),
            text: text_content(&raw),
        },
        "tool_use" => StreamEvent::ToolUse {
            tool: raw.tool.clone().unwrap_or_default(),
            input: raw.tool_input.clone().unwrap_or(Value::Null),
        },
        "tool_result" => {
            let full_text = tool_result_text(&raw);
            let full_len = full_text.chars().count();
            let text = truncate_with_ellipsis(&full_text, TOOL_RESULT_CEILING);
            StreamEvent::ToolResult {
                text,
                is_error: raw.is_error.unwrap_or(false),
                full_len,
            }
        }
        "result" => {
            let subtype = match raw.subtype.as_deref() {
                Some("error") => ResultSubtype::Error,
                _ => {
                    if raw.is_error.unwrap_or(false) {
                        ResultSubtype::Error
                    } else {
                        ResultSubtype::Success
                    }
                }
            };
            StreamEvent::Result {
                subtype,
                text: tool_result_text(&raw),
                cost: raw.cost_usd,
                usage: merged_usage(&raw),
            }
        }
        "error" => StreamEvent::Error {
            text: tool_result_text(&raw),
        },
        _ => {
            tracing::trace!(line_type = %raw.line_type, "unrecognized worker event type, emitting raw event");
            raw_event(line)
        }
    }
}

fn raw_event(line: &str) -> StreamEvent {
    StreamEvent::System {
        subtype: "raw".to_string(),
        text: line.to_string(),
    }
}

/// Text for assistant/user/system events: prefers the top-level `content`
/// field, falling back to `message.content` (§4.1 — usage and content may
/// both appear either top-level or nested under `message`).
fn text_content(raw: &RawLine) -> String {
    if let Some(content) = &raw.content {
        return extract_text(content);
    }
    if let Some(message) = &raw.message {
        if let Some(content) = message.get("content") {
            return extract_text(content);
        }
        return extract_text(message);
    }
    String::new()
}

/// Text for tool_result/result/error events: prefers `result`, falling
/// back to `content`/`message`.
fn tool_result_text(raw: &RawLine) -> String {
    if let Some(result) = &raw.result {
        return result.clone();
    }
    text_content(raw)
}

/// Merges usage fields wherever they appear: top-level `usage`, and
/// `message.usage`, preferring non-zero per field (§4.1). Returns `None`
/// when no usage was reported at all.
fn merged_usage(raw: &RawLine) -> Option<UsageDelta> {
    let mut merged = raw.usage.unwrap_or_default();

    if let Some(message) = &raw.message {
        if let Some(nested) = message.get("usage") {
            if let Ok(nested_usage) = serde_json::from_value::<RawUsage>(nested.clone()) {
                merged.merge_preferring_nonzero(&nested_usage);
            }
        }
    }

    let cost = raw.cost_usd.unwrap_or(0.0);
    if merged.is_empty() && cost == 0.0 {
        return None;
    }

    Some(UsageDelta {
        input_tokens: merged.input_tokens,
        output_tokens: merged.output_tokens,
        cache_read_tokens: merged.cache_read_input_tokens,
        cache_write_tokens: merged.cache_creation_input_tokens,
        cost_usd: cost,
    })
}

#[cfg(test)]
#[path = "line.test.rs"]
mod tests;
