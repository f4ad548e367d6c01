//! Content-classification signals used to drive escalation/deescalation
//! decisions (§4.4). These are deliberately plain substring checks — the
//! patterns are short, fixed phrases, not full regular expressions.

const ARCHITECTURAL_PATTERNS: &[&str] = &[
    "architecture",
    "architectural",
    "design pattern",
    "design decision",
    "design choice",
    "system design",
    "api design",
    "database schema",
    "data model",
    "trade-off",
];

const DEBUGGING_PATTERNS: &[&str] = &[
    "debug",
    "stack trace",
    "core dump",
    "segfault",
    "segmentation",
    "race condition",
    "deadlock",
    "memory leak",
    "panic:",
];

const COMPLEX_DEBUGGING_PATTERNS: &[&str] = &[
    "race condition",
    "deadlock",
    "memory leak",
    "concurrency bug",
    "intermittent failure",
    "heap corruption",
];

const COMPILE_ERROR_PATTERNS: &[&str] = &[
    "compile error",
    "compilation error",
    "build failed",
    "build error",
    "syntax error",
];

const TEST_FAILURE_PATTERNS: &[&str] = &[
    "test failed",
    "--- fail",
    "assertion failed",
    "expected:",
    "actual:",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    needles.iter().any(|needle| lower.contains(needle))
}

pub fn is_architectural(text: &str) -> bool {
    contains_any(text, ARCHITECTURAL_PATTERNS)
}

pub fn is_debugging(text: &str) -> bool {
    contains_any(text, DEBUGGING_PATTERNS)
}

pub fn is_complex_debugging(text: &str) -> bool {
    contains_any(text, COMPLEX_DEBUGGING_PATTERNS)
}

/// Whether `text` looks like a compile/build/syntax error or a test
/// failure (§4.4 item 1 — either family bumps the test-failure counter).
pub fn is_build_or_test_failure(text: &str) -> bool {
    contains_any(text, COMPILE_ERROR_PATTERNS) || contains_any(text, TEST_FAILURE_PATTERNS)
}

/// Counts how many entries of `keywords` appear in `text` (case-insensitive
/// substring match), for the generic "≥2 configured keywords" rule.
pub fn count_keyword_matches(text: &str, keywords: &[String]) -> usize {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| lower.contains(&keyword.to_lowercase()))
        .count()
}

/// Tiers named in an explicit model request, matched in the order they
/// should be tried (so "opus" outranks "sonnet" outranks "haiku" when a
/// message names more than one).
const TIER_NAMES: &[(&str, conductor_protocol::feature::ModelTier)] = &[
    ("opus", conductor_protocol::feature::ModelTier::Premium),
    ("premium", conductor_protocol::feature::ModelTier::Premium),
    ("sonnet", conductor_protocol::feature::ModelTier::Mid),
    ("mid", conductor_protocol::feature::ModelTier::Mid),
    ("haiku", conductor_protocol::feature::ModelTier::Cheap),
    ("cheap", conductor_protocol::feature::ModelTier::Cheap),
];

const EXPLICIT_REQUEST_VERBS: &[&str] =
    &["need", "require", "switch to", "escalate to", "this is simple"];

/// Detects an explicit request to use a specific tier (§4.4 item 3):
/// "need/require/switch to/escalate to opus|sonnet|haiku", or the
/// simplicity phrase "this is simple" (which always targets cheap).
pub fn explicit_tier_request(text: &str) -> Option<conductor_protocol::feature::ModelTier> {
    let lower = text.to_lowercase();

    if lower.contains("this is simple") {
        return Some(conductor_protocol::feature::ModelTier::Cheap);
    }

    let has_verb = EXPLICIT_REQUEST_VERBS
        .iter()
        .any(|verb| lower.contains(verb));
    if !has_verb {
        return None;
    }

    TIER_NAMES
        .iter()
        .find(|(name, _)| lower.contains(name))
        .map(|(_, tier)| *tier)
}

#[cfg(test)]
#[path = "patterns.test.rs"]
mod tests;
