use chrono::Utc;
use serde_json::json;

use super::*;

#[test]
fn bash_classifies_to_command() {
    let action = classify("Bash", &json!({"command": "cargo test"}), Utc::now()).unwrap();
    assert_eq!(action.action_type, ActionType::Command);
    assert_eq!(action.target, "cargo test");
}

#[test]
fn classification_is_case_insensitive() {
    let action = classify("bash", &json!({"command": "ls"}), Utc::now()).unwrap();
    assert_eq!(action.action_type, ActionType::Command);
}

#[test]
fn write_and_edit_classify_to_file_modify() {
    for tool in ["Write", "Edit"] {
        let action = classify(tool, &json!({"file_path": "a.rs"}), Utc::now()).unwrap();
        assert_eq!(action.action_type, ActionType::FileModify);
    }
}

#[test]
fn read_classifies_to_file_read() {
    let action = classify("Read", &json!({"file_path": "a.rs"}), Utc::now()).unwrap();
    assert_eq!(action.action_type, ActionType::FileRead);
}

#[test]
fn glob_and_grep_classify_to_search() {
    for tool in ["Glob", "Grep"] {
        let action = classify(tool, &json!({"pattern": "x"}), Utc::now()).unwrap();
        assert_eq!(action.action_type, ActionType::Search);
    }
}

#[test]
fn task_and_agent_classify_to_agent() {
    for tool in ["Task", "Agent"] {
        let action = classify(tool, &json!({"prompt": "go"}), Utc::now()).unwrap();
        assert_eq!(action.action_type, ActionType::Agent);
    }
}

#[test]
fn webfetch_classifies_to_web_fetch() {
    let action = classify("WebFetch", &json!({"url": "https://x"}), Utc::now()).unwrap();
    assert_eq!(action.action_type, ActionType::WebFetch);
}

#[test]
fn dropped_tools_yield_no_action() {
    for tool in [
        "TodoWrite",
        "WebSearch",
        "AskUserQuestion",
        "Skill",
        "NotebookEdit",
    ] {
        assert!(classify(tool, &json!({}), Utc::now()).is_none());
    }
}

#[test]
fn spawn_tool_is_not_a_plain_action() {
    assert!(classify(SPAWN_TOOL_NAME, &json!({"title": "x"}), Utc::now()).is_none());
}

#[test]
fn unknown_tool_yields_no_action() {
    assert!(classify("SomeFutureTool", &json!({}), Utc::now()).is_none());
}
