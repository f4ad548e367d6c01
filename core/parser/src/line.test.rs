use conductor_protocol::stream_event::ResultSubtype;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn malformed_json_becomes_raw_system_event() {
    let event = parse_line("not json at all {");
    match event {
        StreamEvent::System { subtype, text } => {
            assert_eq!(subtype, "raw");
            assert_eq!(text, "not json at all {");
        }
        other => panic!("expected raw system event, got {other:?}"),
    }
}

#[test]
fn unknown_type_becomes_raw_system_event() {
    let event = parse_line(r#"{"type":"mystery"}"#);
    assert!(matches!(event, StreamEvent::System { subtype, .. } if subtype == "raw"));
}

#[test]
fn parsing_twice_is_idempotent() {
    let line = r#"{"type":"assistant","content":"hi there"}"#;
    assert_eq!(parse_line(line), parse_line(line));
}

#[test]
fn assistant_text_is_truncated() {
    let long_text = "a".repeat(300);
    let line = format!(r#"{{"type":"assistant","content":"{long_text}"}}"#);
    match parse_line(&line) {
        StreamEvent::Assistant { text, .. } => {
            assert_eq!(text.chars().count(), 203);
        }
        other => panic!("expected assistant event, got {other:?}"),
    }
}

#[test]
fn usage_merges_top_level_and_nested_preferring_nonzero() {
    let line = r#"{
        "type": "assistant",
        "content": "done",
        "usage": {"input_tokens": 10, "output_tokens": 0},
        "message": {"usage": {"input_tokens": 0, "output_tokens": 20}}
    }"#;
    match parse_line(line) {
        StreamEvent::Assistant { usage, .. } => {
            let usage = usage.expect("usage present");
            assert_eq!(usage.input_tokens, 10);
            assert_eq!(usage.output_tokens, 20);
        }
        other => panic!("expected assistant event, got {other:?}"),
    }
}

#[test]
fn content_falls_back_to_nested_message() {
    let line = r#"{"type":"assistant","message":{"content":"nested text"}}"#;
    match parse_line(line) {
        StreamEvent::Assistant { text, .. } => assert_eq!(text, "nested text"),
        other => panic!("expected assistant event, got {other:?}"),
    }
}

#[test]
fn tool_use_carries_tool_and_input() {
    let line = r#"{"type":"tool_use","tool":"Bash","tool_input":{"command":"ls -la"}}"#;
    match parse_line(line) {
        StreamEvent::ToolUse { tool, input } => {
            assert_eq!(tool, "Bash");
            assert_eq!(input["command"], "ls -la");
        }
        other => panic!("expected tool_use event, got {other:?}"),
    }
}

#[test]
fn tool_result_error_flag_and_truncation() {
    let long_result = "x".repeat(600);
    let line = format!(r#"{{"type":"tool_result","result":"{long_result}","is_error":true}}"#);
    match parse_line(&line) {
        StreamEvent::ToolResult { text, is_error, full_len } => {
            assert!(is_error);
            assert_eq!(text.chars().count(), 503);
            assert_eq!(full_len, 600);
        }
        other => panic!("expected tool_result event, got {other:?}"),
    }
}

/// §4.4 item 2's architectural mid→premium escalation gates on the
/// *pre-truncation* tool-result length (>5000 chars); `full_len` must
/// survive C1's 500-char display ceiling so that threshold is reachable.
#[test]
fn tool_result_full_len_survives_truncation() {
    let long_result = "x".repeat(5001);
    let line = format!(r#"{{"type":"tool_result","result":"{long_result}","is_error":false}}"#);
    match parse_line(&line) {
        StreamEvent::ToolResult { text, full_len, .. } => {
            assert!(text.chars().count() < full_len);
            assert_eq!(full_len, 5001);
        }
        other => panic!("expected tool_result event, got {other:?}"),
    }
}

#[test]
fn result_subtype_and_cost() {
    let line = r#"{"type":"result","subtype":"success","result":"ok","cost_usd":0.42}"#;
    match parse_line(line) {
        StreamEvent::Result {
            subtype,
            text,
            cost,
            ..
        } => {
            assert_eq!(subtype, ResultSubtype::Success);
            assert_eq!(text, "ok");
            assert_eq!(cost, Some(0.42));
        }
        other => panic!("expected result event, got {other:?}"),
    }
}

#[test]
fn result_without_subtype_but_is_error_becomes_error_subtype() {
    let line = r#"{"type":"result","result":"boom","is_error":true}"#;
    match parse_line(line) {
        StreamEvent::Result { subtype, .. } => assert_eq!(subtype, ResultSubtype::Error),
        other => panic!("expected result event, got {other:?}"),
    }
}

#[test]
fn error_event_text() {
    let line = r#"{"type":"error","result":"subprocess exploded"}"#;
    match parse_line(line) {
        StreamEvent::Error { text } => assert_eq!(text, "subprocess exploded"),
        other => panic!("expected error event, got {other:?}"),
    }
}

#[test]
fn no_usage_reported_is_none() {
    let line = r#"{"type":"assistant","content":"hi"}"#;
    match parse_line(line) {
        StreamEvent::Assistant { usage, .. } => assert!(usage.is_none()),
        other => panic!("expected assistant event, got {other:?}"),
    }
}
