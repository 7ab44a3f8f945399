//! # Client Error Types
//!
//! Unified error handling for Seats.aero API calls and tool input validation.

use thiserror::Error;

/// Client operation result type
pub type ClientResult<T> = Result<T, ClientError>;

/// Error kinds surfaced to tool callers
#[derive(Debug, Error)]
pub enum ClientError {
    /// Malformed, out-of-range or unknown input. Raised before any network call.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Missing or blank partner token, or an unusable base URL.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream answered with HTTP status >= 400.
    #[error("Seats.aero API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Upstream answered 2xx with a body that is not the JSON we expect.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Create an API error from HTTP response
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error naming the offending field
    pub fn validation(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Validation(format!("{field}: {reason}"))
    }

    /// Create a protocol error for unparseable or unexpectedly shaped bodies
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol(message.into())
    }

    /// Stable machine-readable code used in structured error payloads.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "validation_error",
            ClientError::Config(_) => "configuration_error",
            ClientError::Api { .. } => "upstream_error",
            ClientError::Protocol(_) => "protocol_error",
            ClientError::Http(_) => "network_error",
        }
    }

    /// HTTP status of an upstream failure, if there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Constructor tests ----

    #[test]
    fn test_api_error_constructor() {
        let err = ClientError::api_error(429, "rate limited");
        match err {
            ClientError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            _ => panic!("Expected Api variant"),
        }
    }

    #[test]
    fn test_config_error_constructor() {
        let err = ClientError::config_error("token missing");
        match err {
            ClientError::Config(msg) => assert_eq!(msg, "token missing"),
            _ => panic!("Expected Config variant"),
        }
    }

    #[test]
    fn test_validation_names_field() {
        let err = ClientError::validation("take", "must be between 10 and 1000");
        match err {
            ClientError::Validation(msg) => assert_eq!(msg, "take: must be between 10 and 1000"),
            _ => panic!("Expected Validation variant"),
        }
    }

    // ---- code / status ----

    #[test]
    fn test_codes() {
        assert_eq!(ClientError::validation("x", "y").code(), "validation_error");
        assert_eq!(ClientError::config_error("x").code(), "configuration_error");
        assert_eq!(ClientError::api_error(500, "x").code(), "upstream_error");
        assert_eq!(ClientError::protocol("x").code(), "protocol_error");
    }

    #[test]
    fn test_status_only_for_api_errors() {
        assert_eq!(ClientError::api_error(404, "missing").status(), Some(404));
        assert_eq!(ClientError::protocol("bad").status(), None);
        assert_eq!(ClientError::config_error("bad").status(), None);
    }

    // ---- Display tests ----

    #[test]
    fn test_display_api_error() {
        let err = ClientError::api_error(503, "service down");
        assert_eq!(format!("{err}"), "Seats.aero API error 503: service down");
    }

    #[test]
    fn test_display_config_error() {
        let err = ClientError::config_error("missing token");
        assert_eq!(format!("{err}"), "Configuration error: missing token");
    }

    #[test]
    fn test_display_protocol_error() {
        let err = ClientError::protocol("Seats.aero returned invalid JSON");
        assert_eq!(
            format!("{err}"),
            "Protocol error: Seats.aero returned invalid JSON"
        );
    }

    #[test]
    fn test_debug_impl() {
        let err = ClientError::api_error(500, "boom");
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("Api"));
    }
}
