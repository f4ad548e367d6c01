use conductor_error::StatusCode;

use super::*;

#[test]
fn no_such_failure_maps_to_child_failed() {
    let err = NoSuchFailureSnafu { child_id: "abc".to_string() }.build();
    assert_eq!(err.status_code(), StatusCode::ChildFailed);
}
