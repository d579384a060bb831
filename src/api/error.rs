//! Transport errors and the messages shown for them.

use thiserror::Error;

/// Shown when a failure carries no usable server message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Failure of a single request to the REST API.
///
/// Holds plain data rather than the underlying `reqwest::Error` so the
/// error can be cloned into view state and compared in tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not reach the server (DNS, refused, reset).
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {0}s")]
    Timeout(u64),

    /// Server answered with a non-2xx status.
    #[error("Server error: {status}{}", .message.as_deref().map(|m| format!(" - {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// Response body could not be decoded or failed record validation.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The request could not be built (bad URL, bad header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Human-readable message for the view layer.
    ///
    /// Uses the server's own message when the response carried one,
    /// otherwise [`GENERIC_ERROR_MESSAGE`].
    pub fn display_message(&self) -> String {
        match self {
            TransportError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Get error type string for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            TransportError::Connection(_) => "connection_error",
            TransportError::Timeout(_) => "request_timeout",
            TransportError::Status { .. } => "status_error",
            TransportError::Malformed(_) => "malformed_response",
            TransportError::InvalidRequest(_) => "invalid_request",
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(timeout_secs)
        } else if err.is_builder() {
            TransportError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            TransportError::Malformed(err.to_string())
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Recognizes `{"message": ..}`, `{"error": ..}`, `{"error": {"message": ..}}`
/// and `{"detail": ..}`. Blank messages count as absent.
pub fn extract_server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;

    let candidates = [
        value.get("message"),
        value.get("error").and_then(|e| e.get("message")),
        value.get("error"),
        value.get("detail"),
    ];

    let message = candidates
        .into_iter()
        .flatten()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string);
    message
}
