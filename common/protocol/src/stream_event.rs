//! Worker stdout/stderr wire schema (§6) and the typed events the parser
//! (C1) produces from it (§3 `StreamEvent`).

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Usage fields as they appear on the wire, either top-level or nested
/// under `message` (§4.1 — the parser merges both, preferring non-zero).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct RawUsage {
    #[serde(default)]
    pub input_tokens: i64,
    #[serde(default)]
    pub output_tokens: i64,
    #[serde(default)]
    pub cache_read_input_tokens: i64,
    #[serde(default)]
    pub cache_creation_input_tokens: i64,
}

impl RawUsage {
    /// Merges `other` into `self`, preferring non-zero values per field
    /// (§4.1).
    pub fn merge_preferring_nonzero(&mut self, other: &RawUsage) {
        if self.input_tokens == 0 {
            self.input_tokens = other.input_tokens;
        }
        if self.output_tokens == 0 {
            self.output_tokens = other.output_tokens;
        }
        if self.cache_read_input_tokens == 0 {
            self.cache_read_input_tokens = other.cache_read_input_tokens;
        }
        if self.cache_creation_input_tokens == 0 {
            self.cache_creation_input_tokens = other.cache_creation_input_tokens;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input_tokens == 0
            && self.output_tokens == 0
            && self.cache_read_input_tokens == 0
            && self.cache_creation_input_tokens == 0
    }
}

/// Raw line schema exactly as specified in §6. Every field but `type` is
/// optional; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLine {
    #[serde(rename = "type")]
    pub line_type: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub tool_input: Option<Value>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub is_error: Option<bool>,
    #[serde(default)]
    pub cost_usd: Option<f64>,
    #[serde(default)]
    pub usage: Option<RawUsage>,
}

/// Usage carried alongside an event, when the line reported any (§3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageDelta {
    pub input_tokens: i64,
    pub output_tokens: i64,
    pub cache_read_tokens: i64,
    pub cache_write_tokens: i64,
    pub cost_usd: f64,
}

/// Result subtype for a `Result` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSubtype {
    Success,
    Error,
}

/// Typed event produced by the stream parser (C1), per §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StreamEvent {
    Assistant {
        text: String,
        usage: Option<UsageDelta>,
    },
    User {
        text: String,
    },
    System {
        subtype: String,
        text: String,
    },
    ToolUse {
        tool: String,
        input: Value,
    },
    ToolResult {
        text: String,
        is_error: bool,
        /// Character count of the tool-result content *before* C1's
        /// fixed-ceiling truncation (§4.1), so length-gated classification
        /// (§4.4 item 2, "content length >5000") still sees the real size
        /// even though `text` itself is capped for downstream storage.
        full_len: usize,
    },
    Result {
        subtype: ResultSubtype,
        text: String,
        cost: Option<f64>,
        usage: Option<UsageDelta>,
    },
    Error {
        text: String,
    },
    /// Standalone usage report, when a line carries only usage.
    Usage {
        usage: UsageDelta,
    },
}

impl StreamEvent {
    /// Extracts any usage carried on this event (Assistant/Result/Usage),
    /// per §3 "may be carried on Assistant/Result too".
    pub fn usage(&self) -> Option<UsageDelta> {
        match self {
            StreamEvent::Assistant { usage, .. } => *usage,
            StreamEvent::Result { usage, .. } => *usage,
            StreamEvent::Usage { usage } => Some(*usage),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "stream_event.test.rs"]
mod tests;
