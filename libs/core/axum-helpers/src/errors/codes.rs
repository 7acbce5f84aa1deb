//! Error codes carried by every error envelope.
//!
//! Each code has a SCREAMING_SNAKE_CASE identifier for clients, an integer
//! for logs and dashboards, and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid UUID in a path or query parameter
    InvalidUuid,

    /// JSON body could not be extracted
    JsonExtraction,

    NotFound,

    /// Request is missing something the operation needs
    BadRequest,

    /// Multipart body could not be read
    MultipartError,

    /// Request body exceeds the configured limit
    PayloadTooLarge,

    MethodNotAllowed,

    // Server errors (5000-5999)
    InternalError,

    ServiceUnavailable,

    /// Database driver or query failure
    DatabaseError,

    /// An upstream HTTP service (e.g. the image host) failed
    UpstreamError,
}

impl ErrorCode {
    /// Identifier clients can match on.
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
    /// assert_eq!(ErrorCode::UpstreamError.as_str(), "UPSTREAM_ERROR");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
            Self::MultipartError => "MULTIPART_ERROR",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::UpstreamError => "UPSTREAM_ERROR",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: client errors
    /// - 5000-5999: server and dependency errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::BadRequest => 1005,
            Self::MultipartError => 1006,
            Self::PayloadTooLarge => 1007,
            Self::MethodNotAllowed => 1008,

            Self::InternalError => 5001,
            Self::ServiceUnavailable => 5002,
            Self::DatabaseError => 5003,
            Self::UpstreamError => 5004,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::BadRequest => "Bad request",
            Self::MultipartError => "Failed to read multipart body",
            Self::PayloadTooLarge => "Request body is too large",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "Database error occurred",
            Self::UpstreamError => "Upstream service failed",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 12] = [
        ErrorCode::ValidationError,
        ErrorCode::InvalidUuid,
        ErrorCode::JsonExtraction,
        ErrorCode::NotFound,
        ErrorCode::BadRequest,
        ErrorCode::MultipartError,
        ErrorCode::PayloadTooLarge,
        ErrorCode::MethodNotAllowed,
        ErrorCode::InternalError,
        ErrorCode::ServiceUnavailable,
        ErrorCode::DatabaseError,
        ErrorCode::UpstreamError,
    ];

    #[test]
    fn test_integer_codes_are_unique_and_ranged() {
        let mut seen = std::collections::HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code for {code}");
            assert!((1000..6000).contains(&code.code()));
        }
    }

    #[test]
    fn test_serialized_form_matches_as_str() {
        for code in ALL {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_deserialization() {
        let code: ErrorCode = serde_json::from_str("\"UPSTREAM_ERROR\"").unwrap();
        assert_eq!(code, ErrorCode::UpstreamError);
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_messages() {
        assert_eq!(ErrorCode::NotFound.default_message(), "Resource not found");
        assert_eq!(ErrorCode::InvalidUuid.default_message(), "Invalid UUID format");
    }
}
