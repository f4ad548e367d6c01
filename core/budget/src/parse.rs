//! Budget syntax parser (§4.5, §6).
//!
//! Accepts `12345`, `50k`, `1.5M`, `$5.00`, with an optional trailing
//! "tokens"/"token" suffix. Negative or zero values are rejected.

/// A parsed budget, on one of the two axes the spec distinguishes (§4.5).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetValue {
    Tokens(i64),
    Usd(f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetParseError {
    Unparsable(String),
    NonPositive(String),
}

/// Parses a budget string per §6 ("`Budget: $5.00`, `Tokens: 100k`,
/// `Context: 1.5M tokens`") — this function parses the *value* half, after
/// any leading label has been stripped by the caller.
pub fn parse_budget(input: &str) -> Result<BudgetValue, BudgetParseError> {
    let original = input.to_string();
    let trimmed = input.trim();

    if let Some(rest) = trimmed.strip_prefix('$') {
        let amount: f64 = rest
            .trim()
            .parse()
            .map_err(|_| BudgetParseError::Unparsable(original.clone()))?;
        if amount <= 0.0 {
            return Err(BudgetParseError::NonPositive(original));
        }
        return Ok(BudgetValue::Usd(amount));
    }

    let without_unit_word = strip_token_word(trimmed);
    let (number_part, multiplier) = split_magnitude_suffix(without_unit_word);

    let amount: f64 = number_part
        .trim()
        .parse()
        .map_err(|_| BudgetParseError::Unparsable(original.clone()))?;
    if amount <= 0.0 {
        return Err(BudgetParseError::NonPositive(original));
    }

    let tokens = (amount * multiplier).round() as i64;
    Ok(BudgetValue::Tokens(tokens))
}

fn strip_token_word(s: &str) -> &str {
    let s = s.trim();
    for suffix in ["tokens", "token"] {
        if s.len() > suffix.len() {
            let (head, tail) = s.split_at(s.len() - suffix.len());
            if tail.eq_ignore_ascii_case(suffix) {
                return head.trim_end();
            }
        }
    }
    s
}

fn split_magnitude_suffix(s: &str) -> (&str, f64) {
    let s = s.trim();
    if let Some(head) = s.strip_suffix(['k', 'K']) {
        return (head, 1_000.0);
    }
    if let Some(head) = s.strip_suffix(['m', 'M']) {
        return (head, 1_000_000.0);
    }
    (s, 1.0)
}

#[cfg(test)]
#[path = "parse.test.rs"]
mod tests;
