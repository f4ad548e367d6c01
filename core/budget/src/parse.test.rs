use super::*;

#[test]
fn parses_plain_integer_as_tokens() {
    assert_eq!(parse_budget("12345"), Ok(BudgetValue::Tokens(12_345)));
}

#[test]
fn parses_k_suffix() {
    assert_eq!(parse_budget("50k"), Ok(BudgetValue::Tokens(50_000)));
    assert_eq!(parse_budget("50K"), Ok(BudgetValue::Tokens(50_000)));
}

#[test]
fn parses_m_suffix_with_decimal() {
    assert_eq!(parse_budget("1.5M"), Ok(BudgetValue::Tokens(1_500_000)));
}

#[test]
fn parses_dollar_amount_as_usd() {
    assert_eq!(parse_budget("$5.00"), Ok(BudgetValue::Usd(5.0)));
}

#[test]
fn parses_trailing_tokens_word() {
    assert_eq!(parse_budget("100k tokens"), Ok(BudgetValue::Tokens(100_000)));
    assert_eq!(parse_budget("1.5M tokens"), Ok(BudgetValue::Tokens(1_500_000)));
    assert_eq!(parse_budget("500 token"), Ok(BudgetValue::Tokens(500)));
}

#[test]
fn rejects_negative_and_zero() {
    assert!(matches!(parse_budget("-5"), Err(BudgetParseError::NonPositive(_))));
    assert!(matches!(parse_budget("0"), Err(BudgetParseError::NonPositive(_))));
    assert!(matches!(parse_budget("$0"), Err(BudgetParseError::NonPositive(_))));
}

#[test]
fn rejects_garbage() {
    assert!(matches!(parse_budget("not a budget"), Err(BudgetParseError::Unparsable(_))));
}
