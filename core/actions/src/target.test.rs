use serde_json::json;

use super::*;

#[test]
fn short_path_unchanged() {
    assert_eq!(shorten_path("src/main.rs"), "src/main.rs");
}

#[test]
fn long_path_shortened_to_parent_and_file() {
    assert_eq!(
        shorten_path("/root/crate/core/parser/src/lib.rs"),
        ".../src/lib.rs"
    );
}

#[test]
fn command_target_truncates() {
    let input = json!({"command": "x".repeat(150)});
    assert_eq!(command_target(&input).chars().count(), 103);
}

#[test]
fn file_target_prefers_file_path() {
    let input = json!({"file_path": "/a/b/c/d/e.rs", "path": "ignored"});
    assert_eq!(file_target(&input), ".../d/e.rs");
}

#[test]
fn web_fetch_target_prefers_url() {
    let input = json!({"url": "https://example.com", "query": "ignored"});
    assert_eq!(web_fetch_target(&input), "https://example.com");
}

#[test]
fn web_fetch_target_falls_back_to_query() {
    let input = json!({"query": "rust tokio docs"});
    assert_eq!(web_fetch_target(&input), "rust tokio docs");
}

#[test]
fn agent_target_uses_subagent_type_and_description() {
    let input = json!({"subagent_type": "explore", "description": "find the bug"});
    assert_eq!(agent_target(&input), "explore: find the bug");
}

#[test]
fn agent_target_falls_back_to_prompt() {
    let input = json!({"prompt": "do the thing"});
    assert_eq!(agent_target(&input), "do the thing");
}

#[test]
fn search_target_combines_pattern_and_path() {
    let input = json!({"pattern": "TODO", "path": "/a/b/c/d"});
    assert_eq!(search_target(&input), "TODO in .../c/d");
}
