use conductor_error::StatusCode;

use super::*;

#[test]
fn garbage_input_classifies_as_invalid_budget() {
    let err = crate::parse_budget_checked("nonsense").unwrap_err();
    assert_eq!(err.status_code(), StatusCode::InvalidBudget);
    assert!(err.to_string().contains("nonsense"));
}

#[test]
fn non_positive_input_classifies_as_invalid_budget() {
    let err = crate::parse_budget_checked("-10").unwrap_err();
    assert_eq!(err.status_code(), StatusCode::InvalidBudget);
    assert!(!err.is_retryable());
}
