//! Child-prompt construction (§4.6).
//!
//! Given a parent's context, the child's budget, and the child's title and
//! tasks, builds the Markdown prompt handed to the child worker: a header,
//! a task list, then as much parent context as the remaining budget allows,
//! prioritized (parent section > project context > recent progress
//! entries) and truncated head-and-tail when a section doesn't fit whole.

use crate::budget::MIN_CONTEXT_BUDGET;
use crate::estimate::estimate_tokens;

/// Tokens reserved as headroom before handing the rest of the child's
/// budget to parent-context extraction (§4.6 step 2).
const HEADROOM_TOKENS: i64 = 1_000;

const TRUNCATION_SEPARATOR: &str = "\n\n[... context truncated to fit budget ...]\n\n";

/// Fraction of a section kept from its head when it must be truncated
/// (§4.6 step 3 "keep first ~20% and the tail").
const HEAD_KEEP_RATIO: f64 = 0.2;

/// Inputs to child-prompt construction (§4.6).
pub struct ChildPromptInput<'a> {
    pub child_title: &'a str,
    pub child_tasks: &'a [String],
    pub child_budget: i64,
    /// The parent feature's own context section (highest priority).
    pub parent_section: Option<&'a str>,
    /// Project-wide context (second priority).
    pub project_context: Option<&'a str>,
    /// Free-form recent-progress text, split into entries on `##` heading
    /// boundaries (third priority, most recent first).
    pub recent_progress: Option<&'a str>,
}

/// Builds the full child prompt (§4.6).
pub fn build_child_prompt(input: &ChildPromptInput<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Sub-Feature: {}\n", input.child_title));
    if !input.child_tasks.is_empty() {
        out.push_str("\n## Tasks\n");
        for task in input.child_tasks {
            out.push_str(&format!("- {task}\n"));
        }
    }

    let remaining_budget = (input.child_budget - HEADROOM_TOKENS).max(MIN_CONTEXT_BUDGET / 10);

    let sections = prioritized_sections(input);
    let context = assemble_context(&sections, remaining_budget);
    if !context.is_empty() {
        out.push_str("\n## Context\n");
        out.push_str(&context);
    }

    out
}

fn prioritized_sections<'a>(input: &'a ChildPromptInput<'a>) -> Vec<(&'static str, String)> {
    let mut sections = Vec::new();
    if let Some(parent) = input.parent_section {
        if !parent.trim().is_empty() {
            sections.push(("Parent Feature", parent.to_string()));
        }
    }
    if let Some(project) = input.project_context {
        if !project.trim().is_empty() {
            sections.push(("Project Context", project.to_string()));
        }
    }
    if let Some(progress) = input.recent_progress {
        for (index, entry) in split_by_heading_most_recent_first(progress).into_iter().enumerate() {
            sections.push((
                if index == 0 { "Recent Progress" } else { "Earlier Progress" },
                entry,
            ));
        }
    }
    sections
}

/// Splits `text` into entries on `##` heading boundaries, returning them
/// most-recent-first (the original text is assumed chronological, oldest
/// first, per typical progress-log convention) (§4.6 step 3c).
fn split_by_heading_most_recent_first(text: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.starts_with("## ") && !current.trim().is_empty() {
            entries.push(std::mem::take(&mut current));
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.trim().is_empty() {
        entries.push(current);
    }
    entries.reverse();
    entries
}

/// Fills `budget` tokens with as many prioritized sections as fit, each
/// included verbatim if it fits within half the *remaining* budget at the
/// time it's considered, else truncated head-and-tail (§4.6 step 3).
fn assemble_context(sections: &[(&'static str, String)], budget: i64) -> String {
    let mut out = String::new();
    let mut remaining = budget;

    for (label, content) in sections {
        if remaining <= 0 {
            break;
        }
        let content_tokens = estimate_tokens(content);
        let half_remaining = remaining / 2;

        let rendered = if content_tokens <= half_remaining {
            content.clone()
        } else {
            truncate_head_and_tail(content, half_remaining)
        };

        let rendered_tokens = estimate_tokens(&rendered);
        if rendered_tokens == 0 {
            continue;
        }

        out.push_str(&format!("\n### {label}\n{rendered}\n"));
        remaining -= rendered_tokens;
    }

    out
}

/// Truncates `text` to fit `budget` tokens, keeping the first ~20% and the
/// tail, joined by a separator that preserves both framing and the most
/// recent material (§4.6 step 3).
fn truncate_head_and_tail(text: &str, budget: i64) -> String {
    if budget <= 0 {
        return String::new();
    }
    let budget_chars = (budget as f64 * 4.0) as usize;
    if text.chars().count() <= budget_chars {
        return text.to_string();
    }

    let separator_chars = TRUNCATION_SEPARATOR.chars().count();
    let available = budget_chars.saturating_sub(separator_chars);
    let head_chars = ((available as f64) * HEAD_KEEP_RATIO) as usize;
    let tail_chars = available.saturating_sub(head_chars);

    let chars: Vec<char> = text.chars().collect();
    let head: String = chars.iter().take(head_chars).collect();
    let tail: String = chars
        .iter()
        .skip(chars.len().saturating_sub(tail_chars))
        .collect();

    format!("{head}{TRUNCATION_SEPARATOR}{tail}")
}

#[cfg(test)]
#[path = "prompt.test.rs"]
mod tests;
