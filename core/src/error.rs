//! Error types for the contacts API client.
//!
//! # Design
//! Every failure a caller can see is one `ApiError`. The variant records
//! where the failure happened, so the gateway decides whether to wrap by
//! matching on the variant instead of inspecting error types at runtime. A
//! transport failure is wrapped once into `Transport`; everything the
//! response handler produces passes through untouched.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `RequestGateway` and `ContactService`.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response was received. `detail` keeps the transport's own
    /// message for logs; callers see the generic text.
    #[error("Network error occurred")]
    Transport { detail: String },

    /// A response arrived with a non-2xx status.
    #[error("{message}")]
    HttpStatus {
        message: String,
        status: u16,
        /// Parsed error body, or an empty object if it was not JSON.
        body: Value,
    },

    /// HTTP succeeded but the envelope reported `success: false`.
    #[error("{0}")]
    Domain(String),

    /// Rejected client-side before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A 2xx response body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// HTTP status code, present only for `HttpStatus`.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_hides_detail() {
        let err = ApiError::Transport {
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "Network error occurred");
        assert_eq!(err.status(), None);
        assert!(err.is_transport());
    }

    #[test]
    fn http_status_displays_message() {
        let err = ApiError::HttpStatus {
            message: "boom".to_string(),
            status: 500,
            body: serde_json::json!({"error": "boom"}),
        };
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn domain_error_has_no_status() {
        let err = ApiError::Domain("Failed to fetch contact information".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Failed to fetch contact information");
    }
}
