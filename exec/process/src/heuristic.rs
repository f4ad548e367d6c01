//! Heuristic test-failure detection (§4.9: "zero exit with observed test
//! failures ... also sets `failed`").

use regex_lite::Regex;
use std::sync::OnceLock;

fn failure_count_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(\d+)\s+failed\b").expect("static pattern is valid"))
}

/// Scans accumulated worker output for a nonzero "N failed" count, the
/// common shape test runners print (cargo test, pytest, jest, go test).
pub fn looks_like_test_failure(output: &str) -> bool {
    failure_count_pattern().captures_iter(output).any(|cap| {
        cap.get(1).and_then(|m| m.as_str().parse::<u64>().ok()).is_some_and(|count| count > 0)
    })
}

#[cfg(test)]
#[path = "heuristic.test.rs"]
mod tests;
