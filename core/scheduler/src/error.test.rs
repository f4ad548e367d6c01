use conductor_error::ErrorExt;
use conductor_error::StatusCode;

use super::*;

#[test]
fn classifies_feature_not_found() {
    let error = SchedulerError::FeatureNotFound { id: "f1".to_string() };
    assert_eq!(error.status_code(), StatusCode::FeatureNotFound);
}

#[test]
fn classifies_budget_needs_acknowledgement() {
    let error = SchedulerError::BudgetNeedsAcknowledgement;
    assert_eq!(error.status_code(), StatusCode::BudgetNeedsAcknowledgement);
}
