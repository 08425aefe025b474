//! Mapping of HTTP responses to exchange errors.

use serde::Deserialize;

use crate::error::{ApiError, ApiErrorKind};

/// Error body shape; only `message` is read.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Classify a response by status.
///
/// Only 200 counts as success. For any other status the message comes from
/// the body's `message` field, or is the raw body text when the body is not
/// JSON or carries no string `message`.
pub fn classify(status: u16, body: &str) -> Result<(), ApiError> {
    match ApiErrorKind::from_status(status) {
        None => Ok(()),
        Some(kind) => Err(ApiError::new(kind, status, error_message(body))),
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let body = r#"{"message":"boom"}"#;
        assert!(classify(200, body).is_ok());

        let cases = [
            (400, ApiErrorKind::InvalidRequest),
            (401, ApiErrorKind::InvalidCredential),
            (403, ApiErrorKind::AccessDenied),
            (404, ApiErrorKind::NotFound),
            (500, ApiErrorKind::ServerError),
            (418, ApiErrorKind::Unclassified),
        ];
        for (status, kind) in cases {
            let error = classify(status, body).unwrap_err();
            assert_eq!(error.kind, kind, "status {status}");
            assert_eq!(error.status, status);
            assert_eq!(error.message, "boom");
        }
    }

    #[test]
    fn test_malformed_body_falls_back_to_raw_text() {
        let error = classify(400, "not json").unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::InvalidRequest);
        assert_eq!(error.message, "not json");
    }

    #[test]
    fn test_missing_message_falls_back_to_raw_text() {
        let error = classify(503, r#"{"error":"maintenance"}"#).unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Unclassified);
        assert_eq!(error.message, r#"{"error":"maintenance"}"#);
    }

    #[test]
    fn test_non_string_message_falls_back_to_raw_text() {
        let error = classify(404, r#"{"message":42}"#).unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::NotFound);
        assert_eq!(error.message, r#"{"message":42}"#);
    }

    #[test]
    fn test_rate_limit_is_unclassified() {
        let error = classify(429, r#"{"message":"Private rate limit exceeded"}"#).unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::Unclassified);
        assert!(error.is_rate_limited());
    }
}
