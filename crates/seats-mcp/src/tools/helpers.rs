//! Shared helper functions for MCP tool implementations.

use seats_client::ClientError;

/// Build a structured error JSON string that LLMs can parse.
pub fn error_json(error_code: &str, message: &str) -> String {
    serde_json::json!({
        "error": error_code,
        "message": message,
    })
    .to_string()
}

/// Structured error body for a failed tool call. Upstream failures carry their status.
pub fn client_error_json(err: &ClientError) -> String {
    match err {
        ClientError::Api { status, message } => serde_json::json!({
            "error": err.code(),
            "status": status,
            "message": message,
        })
        .to_string(),
        other => error_json(other.code(), &other.to_string()),
    }
}
