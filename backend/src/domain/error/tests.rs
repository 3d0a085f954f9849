//! Tests for domain error construction.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn base_error() -> Error {
    Error::unauthorized("Invalid username or password.")
}

#[rstest]
fn unauthorized_constructor_sets_code(base_error: Error) {
    assert_eq!(base_error.code(), ErrorCode::Unauthorized);
    assert_eq!(base_error.message(), "Invalid username or password.");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::Unauthorized, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[should_panic(expected = "error messages must satisfy validation")]
fn new_panics_on_blank_message() {
    let _ = Error::new(ErrorCode::InternalError, "");
}

#[rstest]
fn display_uses_message(base_error: Error) {
    assert_eq!(base_error.to_string(), "Invalid username or password.");
}

#[rstest]
#[case(ErrorCode::Unauthorized, "\"unauthorized\"")]
#[case(ErrorCode::InternalError, "\"internal_error\"")]
fn error_code_serialises_snake_case(#[case] code: ErrorCode, #[case] expected: &str) {
    let raw = serde_json::to_string(&code).expect("serialise");
    assert_eq!(raw, expected);
}
