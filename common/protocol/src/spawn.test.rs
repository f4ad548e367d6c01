use super::*;
use serde_json::json;

#[test]
fn valid_spawn_request_parses() {
    let input = json!({
        "title": "Add retry logic",
        "tasks": ["write tests", "implement"],
        "model": "opus",
    });
    let req = SpawnRequest::from_tool_input(&input).expect("valid");
    assert_eq!(req.title, "Add retry logic");
    assert_eq!(req.tasks.len(), 2);
    assert_eq!(req.model, Some(ModelTier::Premium));
}

#[test]
fn empty_title_is_rejected() {
    let input = json!({"title": "", "tasks": []});
    assert_eq!(
        SpawnRequest::from_tool_input(&input).unwrap_err(),
        SpawnValidationError::EmptyTitle
    );
}

#[test]
fn missing_title_is_rejected() {
    let input = json!({"tasks": ["a"]});
    assert_eq!(
        SpawnRequest::from_tool_input(&input).unwrap_err(),
        SpawnValidationError::EmptyTitle
    );
}

#[test]
fn unparsable_payload_is_rejected() {
    let input = json!("not an object");
    assert_eq!(
        SpawnRequest::from_tool_input(&input).unwrap_err(),
        SpawnValidationError::Unparsable
    );
}

#[test]
fn unknown_model_name_is_ignored_not_rejected() {
    let input = json!({"title": "X", "model": "gpt-5"});
    let req = SpawnRequest::from_tool_input(&input).expect("valid");
    assert_eq!(req.model, None);
}
