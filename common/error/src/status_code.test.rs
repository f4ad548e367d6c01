use super::*;
use strum::IntoEnumIterator;

#[test]
fn test_status_code_values() {
    assert_eq!(StatusCode::Success as i32, 00_000);
    assert_eq!(StatusCode::Unknown as i32, 01_000);
    assert_eq!(StatusCode::InvalidArguments as i32, 02_000);
    assert_eq!(StatusCode::IoError as i32, 03_000);
    assert_eq!(StatusCode::NetworkError as i32, 04_000);
    assert_eq!(StatusCode::PermissionDenied as i32, 05_000);

    assert_eq!(StatusCode::InvalidConfig as i32, 10_000);
    assert_eq!(StatusCode::FeatureNotFound as i32, 11_000);
    assert_eq!(StatusCode::SpawnFailed as i32, 12_000);
    assert_eq!(StatusCode::WorkerExitFailure as i32, 13_000);
    assert_eq!(StatusCode::ChildFailed as i32, 14_000);
    assert_eq!(StatusCode::BudgetExceeded as i32, 15_000);
}

#[test]
fn test_is_success() {
    assert!(StatusCode::is_success(0));
    assert!(!StatusCode::is_success(01_000));
}

#[test]
fn test_is_retryable() {
    assert!(StatusCode::NetworkError.is_retryable());
    assert!(StatusCode::MaxConcurrentReached.is_retryable());
    assert!(StatusCode::SpawnFailed.is_retryable());
    assert!(StatusCode::WorkerExitFailure.is_retryable());
    assert!(!StatusCode::InvalidArguments.is_retryable());
    assert!(!StatusCode::MaxDepthExceeded.is_retryable());
    assert!(!StatusCode::ChildAbort.is_retryable());
}

#[test]
fn test_should_log_error() {
    assert!(StatusCode::Unknown.should_log_error());
    assert!(StatusCode::Internal.should_log_error());
    assert!(StatusCode::WorkerErrorEvent.should_log_error());
    assert!(StatusCode::ChildAbort.should_log_error());
    assert!(!StatusCode::InvalidArguments.should_log_error());
    assert!(!StatusCode::WorkerTestFailure.should_log_error());
}

#[test]
fn test_display() {
    assert_eq!(format!("{}", StatusCode::Success), "Success");
    assert_eq!(format!("{}", StatusCode::NetworkError), "NetworkError");
}

#[test]
fn test_name() {
    assert_eq!(StatusCode::Success.name(), "Success");
    assert_eq!(StatusCode::FeatureNotFound.name(), "FeatureNotFound");
    assert_eq!(StatusCode::InvalidArguments.name(), "InvalidArguments");
    assert_eq!(StatusCode::MaxDepthExceeded.name(), "MaxDepthExceeded");
}

#[test]
fn test_category() {
    assert_eq!(StatusCode::Success.category(), StatusCategory::Success);
    assert_eq!(StatusCode::Unknown.category(), StatusCategory::Common);
    assert_eq!(
        StatusCode::InvalidArguments.category(),
        StatusCategory::Input
    );
    assert_eq!(StatusCode::IoError.category(), StatusCategory::IO);
    assert_eq!(StatusCode::NetworkError.category(), StatusCategory::Network);
    assert_eq!(
        StatusCode::PermissionDenied.category(),
        StatusCategory::Auth
    );
    assert_eq!(StatusCode::InvalidConfig.category(), StatusCategory::Config);
    assert_eq!(
        StatusCode::FeatureNotFound.category(),
        StatusCategory::Policy
    );
    assert_eq!(StatusCode::SpawnFailed.category(), StatusCategory::Transport);
    assert_eq!(
        StatusCode::WorkerExitFailure.category(),
        StatusCategory::Worker
    );
    assert_eq!(StatusCode::ChildFailed.category(), StatusCategory::Child);
    assert_eq!(
        StatusCode::BudgetExceeded.category(),
        StatusCategory::Resource
    );
}

#[test]
fn test_metadata_consistency() {
    for code in StatusCode::iter() {
        let meta = code.meta();
        let value = code as i32;

        match meta.category {
            StatusCategory::Success => assert_eq!(value, 0),
            StatusCategory::Common => assert!((01_000..02_000).contains(&value)),
            StatusCategory::Input => assert!((02_000..03_000).contains(&value)),
            StatusCategory::IO => assert!((03_000..04_000).contains(&value)),
            StatusCategory::Network => assert!((04_000..05_000).contains(&value)),
            StatusCategory::Auth => assert!((05_000..06_000).contains(&value)),
            StatusCategory::Config => assert!((10_000..11_000).contains(&value)),
            StatusCategory::Policy => assert!((11_000..12_000).contains(&value)),
            StatusCategory::Transport => assert!((12_000..13_000).contains(&value)),
            StatusCategory::Worker => assert!((13_000..14_000).contains(&value)),
            StatusCategory::Child => assert!((14_000..15_000).contains(&value)),
            StatusCategory::Resource => assert!((15_000..16_000).contains(&value)),
        }
    }
}

#[test]
fn test_retryable_rules() {
    assert!(StatusCode::NetworkError.is_retryable());
    assert!(StatusCode::MaxConcurrentReached.is_retryable());
    assert!(StatusCode::Internal.is_retryable());
    assert!(!StatusCode::PermissionDenied.is_retryable());
    assert!(!StatusCode::InvalidArguments.is_retryable());
    assert!(!StatusCode::InvalidConfig.is_retryable());
    assert!(!StatusCode::BudgetExceeded.is_retryable());
}

#[test]
fn test_log_error_rules() {
    assert!(StatusCode::Unknown.should_log_error());
    assert!(StatusCode::Internal.should_log_error());
    assert!(StatusCode::SpawnFailed.should_log_error());
    assert!(StatusCode::WorkerErrorEvent.should_log_error());
    assert!(!StatusCode::InvalidArguments.should_log_error());
    assert!(!StatusCode::PermissionDenied.should_log_error());
}
