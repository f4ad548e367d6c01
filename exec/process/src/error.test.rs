use conductor_error::StatusCode;

use super::*;

#[test]
fn status_codes_match_transport_and_policy_categories() {
    assert_eq!(
        MaxConcurrencyReachedSnafu { limit: 4usize }.build().status_code(),
        StatusCode::MaxConcurrentReached
    );
    assert_eq!(
        AlreadyRunningSnafu { feature_id: "a" }.build().status_code(),
        StatusCode::AlreadyRunning
    );
    assert_eq!(
        NotRunningSnafu { feature_id: "a" }.build().status_code(),
        StatusCode::WorkerNotRunning
    );
}
