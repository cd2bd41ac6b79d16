use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

/// Field name to backend messages, as extracted from a 422 body.
pub type ValidationErrors = HashMap<String, Vec<String>>;

/// Everything a request can fail with, in the order callers usually
/// care: validation is recovered locally, 401 ends the session, 409 gets
/// its own message on deletes, the rest is generic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(ValidationErrors),
    #[error("authentication required")]
    Unauthorized,
    #[error("{0}")]
    Conflict(String),
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(error: gloo_net::Error) -> Self {
        ApiError::Network(error.to_string())
    }
}

/// The error body shape the backend uses for 4xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: ValidationErrors,
}

/// Maps a non-2xx response onto the taxonomy. Pure on `(status, body)`
/// so it can be tested without a browser.
pub fn classify_failure(status: u16, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    match status {
        401 => ApiError::Unauthorized,
        409 => ApiError::Conflict(
            parsed
                .message
                .unwrap_or_else(|| "This record is still referenced and cannot be deleted.".to_string()),
        ),
        422 => ApiError::Validation(parsed.errors),
        status => ApiError::Status {
            status,
            message: parsed.message.unwrap_or_default(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_401() {
        assert_eq!(classify_failure(401, ""), ApiError::Unauthorized);
        assert_eq!(
            classify_failure(401, r#"{"message":"Unauthenticated."}"#),
            ApiError::Unauthorized
        );
    }

    #[test]
    fn test_classify_422_extracts_field_errors() {
        let body = r#"{
            "message": "The given data was invalid.",
            "errors": {
                "email": ["The email field is required."],
                "password": ["The password must be at least 8 characters.", "mismatch"]
            }
        }"#;
        match classify_failure(422, body) {
            ApiError::Validation(errors) => {
                assert_eq!(errors["email"], vec!["The email field is required."]);
                assert_eq!(errors["password"].len(), 2);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_422_with_unparseable_body_yields_empty_map() {
        match classify_failure(422, "<html>") {
            ApiError::Validation(errors) => assert!(errors.is_empty()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_409_prefers_backend_message() {
        assert_eq!(
            classify_failure(409, r#"{"message":"Pen is referenced by orders."}"#),
            ApiError::Conflict("Pen is referenced by orders.".to_string())
        );
        match classify_failure(409, "") {
            ApiError::Conflict(message) => assert!(!message.is_empty()),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_statuses_are_generic() {
        match classify_failure(500, r#"{"message":"Server Error"}"#) {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Server Error");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
