use conductor_error::StatusCode;

use super::*;

#[test]
fn status_codes_match_spec_error_kinds() {
    assert_eq!(
        FeatureNotFoundSnafu { id: "a" }.build().status_code(),
        StatusCode::FeatureNotFound
    );
    assert_eq!(
        ParentNotRunningSnafu { id: "a" }.build().status_code(),
        StatusCode::ParentNotRunning
    );
    assert_eq!(
        MaxDepthExceededSnafu { id: "a" }.build().status_code(),
        StatusCode::MaxDepthExceeded
    );
    assert_eq!(
        InvalidSpawnDataSnafu { reason: "empty title" }.build().status_code(),
        StatusCode::InvalidSpawnData
    );
}
