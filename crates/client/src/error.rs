//! Client errors.

use serde::Deserialize;
use storedash_core::ValidationErrors;
use thiserror::Error;

/// Errors returned by [`crate::DashboardClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The payload failed validation, either locally before sending or on
    /// the server.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A referenced record does not exist in the store.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// The record is still referenced by others. Carries the user-facing
    /// message for the resource kind.
    #[error("{0}")]
    Conflict(String),

    /// Unknown or foreign store, or unknown record.
    #[error("Not found")]
    NotFound,

    /// No owner identity was sent, or the server rejected it.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// Transport failure or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl ClientError {
    /// Map an error response to a [`ClientError`].
    ///
    /// `conflict` is the message reported for `409`, since the server's
    /// wording is not part of the contract.
    #[must_use]
    pub fn from_response(status: u16, body: &str, conflict: &str) -> Self {
        let message = || {
            serde_json::from_str::<ErrorBody>(body)
                .map_or_else(|_| body.trim().to_string(), |b| b.error)
        };

        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            409 => Self::Conflict(conflict.to_string()),
            422 => match serde_json::from_str::<ValidationErrors>(body) {
                Ok(errors) if !errors.is_empty() => Self::Validation(errors),
                _ => Self::InvalidReference(message()),
            },
            _ => Self::Status {
                status,
                message: message(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_body() {
        let body = r#"{"errors":[{"field":"value","message":"String must be a valid hex code"}]}"#;
        let err = ClientError::from_response(422, body, "unused");
        let ClientError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            errors.for_field("value"),
            Some("String must be a valid hex code")
        );
    }

    #[test]
    fn test_invalid_reference_body() {
        let body = r#"{"error":"Referenced record does not exist in this store"}"#;
        assert!(matches!(
            ClientError::from_response(422, body, "unused"),
            ClientError::InvalidReference(message) if message.contains("does not exist")
        ));
    }

    #[test]
    fn test_conflict_uses_caller_message() {
        let err = ClientError::from_response(409, r#"{"error":"whatever"}"#, "Remove sizes first");
        assert_eq!(err.to_string(), "Remove sizes first");
    }

    #[test]
    fn test_other_statuses() {
        assert!(matches!(
            ClientError::from_response(401, "", ""),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            ClientError::from_response(404, "", ""),
            ClientError::NotFound
        ));
        assert!(matches!(
            ClientError::from_response(500, r#"{"error":"Internal server error"}"#, ""),
            ClientError::Status { status: 500, message } if message == "Internal server error"
        ));
        assert!(matches!(
            ClientError::from_response(502, "bad gateway", ""),
            ClientError::Status { status: 502, message } if message == "bad gateway"
        ));
    }
}
