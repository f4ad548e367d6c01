use serde_json::json;

use super::*;

#[test]
fn plain_string_passthrough() {
    assert_eq!(extract_text(&json!("hello world")), "hello world");
}

#[test]
fn array_of_text_blocks_joined_with_space() {
    let value = json!([
        {"type": "text", "text": "first"},
        {"type": "text", "text": "second"},
    ]);
    assert_eq!(extract_text(&value), "first second");
}

#[test]
fn tool_use_block_becomes_placeholder() {
    let value = json!([
        {"type": "text", "text": "running"},
        {"type": "tool_use", "name": "Bash", "input": {"command": "ls"}},
    ]);
    assert_eq!(extract_text(&value), "running [Tool: Bash]");
}

#[test]
fn tool_result_block_contributes_text() {
    let value = json!([
        {"type": "tool_result", "content": "output here"},
    ]);
    assert_eq!(extract_text(&value), "output here");
}

#[test]
fn unknown_block_type_ignored() {
    let value = json!([
        {"type": "text", "text": "kept"},
        {"type": "thinking", "text": "dropped"},
    ]);
    assert_eq!(extract_text(&value), "kept");
}

#[test]
fn null_is_empty() {
    assert_eq!(extract_text(&Value::Null), "");
}
