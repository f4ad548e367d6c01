use super::*;

#[test]
fn merge_preferring_nonzero_keeps_existing_nonzero_values() {
    let mut a = RawUsage {
        input_tokens: 10,
        output_tokens: 0,
        cache_read_input_tokens: 0,
        cache_creation_input_tokens: 0,
    };
    let b = RawUsage {
        input_tokens: 999,
        output_tokens: 20,
        cache_read_input_tokens: 5,
        cache_creation_input_tokens: 0,
    };
    a.merge_preferring_nonzero(&b);
    assert_eq!(a.input_tokens, 10, "nonzero input from self is kept");
    assert_eq!(a.output_tokens, 20, "zero output from self is filled in");
    assert_eq!(a.cache_read_input_tokens, 5);
}

#[test]
fn raw_usage_is_empty_when_all_zero() {
    assert!(RawUsage::default().is_empty());
    let nonzero = RawUsage {
        input_tokens: 1,
        ..Default::default()
    };
    assert!(!nonzero.is_empty());
}

#[test]
fn assistant_event_carries_usage() {
    let ev = StreamEvent::Assistant {
        text: "hi".to_string(),
        usage: Some(UsageDelta {
            input_tokens: 10,
            ..Default::default()
        }),
    };
    assert_eq!(ev.usage().unwrap().input_tokens, 10);
}

#[test]
fn tool_result_event_has_no_usage() {
    let ev = StreamEvent::ToolResult {
        text: "ok".to_string(),
        is_error: false,
        full_len: 2,
    };
    assert!(ev.usage().is_none());
}

#[test]
fn raw_line_deserializes_unknown_extra_fields_without_error() {
    let json = r#"{"type":"assistant","content":"hi","extra_field":123}"#;
    let line: RawLine = serde_json::from_str(json).expect("parses");
    assert_eq!(line.line_type, "assistant");
}
