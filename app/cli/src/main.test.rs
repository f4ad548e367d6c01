use super::*;

#[test]
fn hash_plan_file_is_stable_for_identical_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");
    std::fs::write(&path, r#"{"features":[]}"#).unwrap();

    let first = hash_plan_file(&path).unwrap();
    let second = hash_plan_file(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
}

#[test]
fn hash_plan_file_changes_with_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.json");

    std::fs::write(&path, r#"{"features":[]}"#).unwrap();
    let before = hash_plan_file(&path).unwrap();

    std::fs::write(&path, r#"{"features":[{"title":"A","tasks":[]}]}"#).unwrap();
    let after = hash_plan_file(&path).unwrap();

    assert_ne!(before, after);
}

#[test]
fn cli_parses_run_subcommand() {
    let cli = Cli::parse_from(["conductor", "run", "plan.json"]);
    match cli.command {
        Command::Run { plan, worker_command, max_concurrency } => {
            assert_eq!(plan, PathBuf::from("plan.json"));
            assert!(worker_command.is_none());
            assert!(max_concurrency.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parses_resume_subcommand() {
    let cli = Cli::parse_from(["conductor", "resume", "plan.json", "progress.json"]);
    match cli.command {
        Command::Resume { plan, progress } => {
            assert_eq!(plan, PathBuf::from("plan.json"));
            assert_eq!(progress, PathBuf::from("progress.json"));
        }
        _ => panic!("expected Resume"),
    }
}

#[test]
fn cli_parses_global_flags_before_subcommand() {
    let cli = Cli::parse_from(["conductor", "--cwd", "/tmp/work", "status"]);
    assert_eq!(cli.cwd, PathBuf::from("/tmp/work"));
    assert!(matches!(cli.command, Command::Status));
}
