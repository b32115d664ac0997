// src/errors.rs
// DOCUMENTATION: Custom error types for the places client
// PURPOSE: Centralized error handling for entire crate

use thiserror::Error;

/// Client-specific error types
/// DOCUMENTATION: Every fallible operation reports one of these variants
/// None of them is fatal; callers may retry any operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacesError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Server error {status}: {message}")]
    ServerError { status: String, message: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl PlacesError {
    /// Stable error code for logs and callers
    /// DOCUMENTATION: Maps error variants to upper snake case codes
    pub fn kind(&self) -> &'static str {
        match self {
            PlacesError::InvalidRequest(_) => "INVALID_REQUEST",
            PlacesError::TransportFailure(_) => "TRANSPORT_FAILURE",
            PlacesError::ServerError { .. } => "SERVER_ERROR",
            PlacesError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            PlacesError::DecodeFailure(_) => "DECODE_FAILURE",
            PlacesError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether repeating the same call may succeed without changing its inputs
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlacesError::TransportFailure(_)
                | PlacesError::ServerError { .. }
                | PlacesError::RateLimitExceeded
        )
    }

    pub(crate) fn server(status: impl Into<String>, message: impl Into<String>) -> Self {
        PlacesError::ServerError {
            status: status.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for PlacesError {
    fn from(e: serde_json::Error) -> Self {
        PlacesError::DecodeFailure(e.to_string())
    }
}

impl From<validator::ValidationErrors> for PlacesError {
    fn from(e: validator::ValidationErrors) -> Self {
        PlacesError::InvalidRequest(e.to_string())
    }
}

impl From<std::io::Error> for PlacesError {
    fn from(e: std::io::Error) -> Self {
        PlacesError::Storage(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            PlacesError::InvalidRequest("bad".into()).kind(),
            "INVALID_REQUEST"
        );
        assert_eq!(PlacesError::server("500", "boom").kind(), "SERVER_ERROR");
        assert_eq!(PlacesError::RateLimitExceeded.kind(), "RATE_LIMIT_EXCEEDED");
    }

    #[test]
    fn test_retryable() {
        assert!(PlacesError::TransportFailure("timeout".into()).is_retryable());
        assert!(PlacesError::server("503", "unavailable").is_retryable());
        assert!(!PlacesError::DecodeFailure("eof".into()).is_retryable());
        assert!(!PlacesError::InvalidRequest("radius".into()).is_retryable());
    }

    #[test]
    fn test_server_error_display() {
        let err = PlacesError::server("REQUEST_DENIED", "The provided API key is invalid.");
        assert_eq!(
            err.to_string(),
            "Server error REQUEST_DENIED: The provided API key is invalid."
        );
    }
}
