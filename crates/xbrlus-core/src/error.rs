//! Error types for XBRL US API operations.
//!
//! This module defines [`XbrlError`] which covers all error cases that can
//! occur when authenticating against or querying the XBRL US API.

use thiserror::Error;

/// Errors that can occur during XBRL US API operations.
#[derive(Error, Debug)]
pub enum XbrlError {
    /// Transport-level failure reaching the token or data endpoint
    /// (DNS, connection, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The token endpoint was unreachable, returned a non-2xx status, or
    /// returned no usable access token.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The data endpoint responded with an HTTP status >= 400.
    #[error("API request failed with status {status} {reason}{suffix}", suffix = .detail.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    Api {
        /// HTTP status code.
        status: u16,
        /// HTTP reason phrase.
        reason: String,
        /// The `error` field from the response body, if one was parseable.
        detail: Option<String>,
    },

    /// A response body could not be decoded into the expected shape,
    /// including a required field being absent.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid or missing configuration (credentials, output paths).
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using [`XbrlError`].
pub type Result<T> = std::result::Result<T, XbrlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_detail() {
        let err = XbrlError::Api {
            status: 404,
            reason: "Not Found".to_string(),
            detail: Some("no such network".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Not Found"));
        assert!(msg.contains("no such network"));
    }

    #[test]
    fn api_error_display_without_detail() {
        let err = XbrlError::Api {
            status: 500,
            reason: "Internal Server Error".to_string(),
            detail: None,
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 500 Internal Server Error"
        );
    }
}
