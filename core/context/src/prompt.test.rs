use super::*;

#[test]
fn header_and_tasks_always_present() {
    let input = ChildPromptInput {
        child_title: "Add retry logic",
        child_tasks: &["write the retry loop".to_string(), "add a test".to_string()],
        child_budget: MIN_CONTEXT_BUDGET,
        parent_section: None,
        project_context: None,
        recent_progress: None,
    };
    let prompt = build_child_prompt(&input);
    assert!(prompt.starts_with("# Sub-Feature: Add retry logic\n"));
    assert!(prompt.contains("- write the retry loop"));
    assert!(prompt.contains("- add a test"));
}

#[test]
fn no_task_list_when_empty() {
    let input = ChildPromptInput {
        child_title: "Leaf",
        child_tasks: &[],
        child_budget: MIN_CONTEXT_BUDGET,
        parent_section: None,
        project_context: None,
        recent_progress: None,
    };
    let prompt = build_child_prompt(&input);
    assert!(!prompt.contains("## Tasks"));
}

#[test]
fn small_sections_included_verbatim() {
    let input = ChildPromptInput {
        child_title: "Leaf",
        child_tasks: &[],
        child_budget: 50_000,
        parent_section: Some("parent is building the auth module"),
        project_context: Some("project: a payments API"),
        recent_progress: None,
    };
    let prompt = build_child_prompt(&input);
    assert!(prompt.contains("parent is building the auth module"));
    assert!(prompt.contains("project: a payments API"));
    assert!(!prompt.contains("truncated to fit budget"));
}

#[test]
fn oversized_section_is_head_and_tail_truncated() {
    let huge = "A".repeat(200_000);
    let input = ChildPromptInput {
        child_title: "Leaf",
        child_tasks: &[],
        child_budget: MIN_CONTEXT_BUDGET,
        parent_section: Some(&huge),
        project_context: None,
        recent_progress: None,
    };
    let prompt = build_child_prompt(&input);
    assert!(prompt.contains("truncated to fit budget"));
    // Keeps framing from the head...
    assert!(prompt.contains("AAAA"));
}

#[test]
fn recent_progress_entries_ordered_most_recent_first() {
    let progress = "## First\nold stuff\n## Second\nnewer stuff\n## Third\nnewest stuff\n";
    let input = ChildPromptInput {
        child_title: "Leaf",
        child_tasks: &[],
        child_budget: 50_000,
        parent_section: None,
        project_context: None,
        recent_progress: Some(progress),
    };
    let prompt = build_child_prompt(&input);
    let third_pos = prompt.find("newest stuff").unwrap();
    let second_pos = prompt.find("newer stuff").unwrap();
    let first_pos = prompt.find("old stuff").unwrap();
    assert!(third_pos < second_pos);
    assert!(second_pos < first_pos);
}

#[test]
fn parent_section_outranks_project_and_progress_when_budget_is_tight() {
    let input = ChildPromptInput {
        child_title: "Leaf",
        child_tasks: &[],
        child_budget: MIN_CONTEXT_BUDGET / 10 + HEADROOM_TOKENS + 10,
        parent_section: Some("parent context"),
        project_context: Some("project context"),
        recent_progress: Some("## Entry\nprogress context\n"),
    };
    let prompt = build_child_prompt(&input);
    assert!(prompt.contains("Parent Feature"));
}
