//! Conservative character-to-token estimator (§4.6).

/// Characters-per-token ratio used by the conservative estimator.
const CHARS_PER_TOKEN: f64 = 4.0;

/// `len(text) * 0.25` characters-to-tokens, i.e. one token per four
/// characters (§4.6).
pub fn estimate_tokens(text: &str) -> i64 {
    ((text.chars().count() as f64) / CHARS_PER_TOKEN).ceil() as i64
}

#[cfg(test)]
#[path = "estimate.test.rs"]
mod tests;
