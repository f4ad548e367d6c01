use conductor_protocol::feature::ExecutionMode;
use conductor_protocol::feature::IsolationLevel;
use conductor_protocol::feature::ModelSelection;
use conductor_protocol::feature::ModelTier;

use super::*;

#[test]
fn loads_minimal_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(&path, r#"{"features":[{"title":"Add login","tasks":["wire up form","add tests"]}]}"#).unwrap();

    let entries = load_plan_file(&path).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Add login");
    assert_eq!(entries[0].tasks.len(), 2);
    assert_eq!(entries[0].model, ModelSelection::Auto);
    assert_eq!(entries[0].execution_mode, ExecutionMode::Sequential);
    assert_eq!(entries[0].isolation_level, IsolationLevel::Lenient);
}

#[test]
fn parses_model_execution_isolation_and_dependencies() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(
        &path,
        r#"{"features":[
            {"title":"A","tasks":[]},
            {"title":"B","tasks":[],"model":"opus","parallel":true,"isolation":"strict","dependencies":["A"]}
        ]}"#,
    )
    .unwrap();

    let entries = load_plan_file(&path).unwrap();
    assert_eq!(entries[1].model, ModelSelection::Fixed(ModelTier::Premium));
    assert_eq!(entries[1].execution_mode, ExecutionMode::Parallel);
    assert_eq!(entries[1].isolation_level, IsolationLevel::Strict);
    assert_eq!(entries[1].dependencies, vec!["A".to_string()]);
}

#[test]
fn parses_usd_and_token_budget_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(
        &path,
        r#"{"features":[{"title":"A","tasks":[],"budget":"$5.00","tokens":"100k"}]}"#,
    )
    .unwrap();

    let entries = load_plan_file(&path).unwrap();
    assert_eq!(entries[0].usd_budget, Some(5.0));
    assert_eq!(entries[0].token_budget, Some(100_000));
}

#[test]
fn rejects_unparsable_budget() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(&path, r#"{"features":[{"title":"A","tasks":[],"budget":"not a budget"}]}"#).unwrap();

    let err = load_plan_file(&path).unwrap_err();
    assert!(matches!(err, PlanFileError::Budget { .. }));
}

#[test]
fn missing_file_is_a_read_error() {
    let err = load_plan_file(Path::new("/nonexistent/plan.json")).unwrap_err();
    assert!(matches!(err, PlanFileError::Read { .. }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(&path, "not json").unwrap();

    let err = load_plan_file(&path).unwrap_err();
    assert!(matches!(err, PlanFileError::Parse { .. }));
}
