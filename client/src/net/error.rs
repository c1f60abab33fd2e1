//! Failure taxonomy for backend calls.
//!
//! DESIGN
//! ======
//! Every call resolves to `Result<T, ApiError>`. The variant says which kind
//! of failure happened; the user-facing text has already been shown by the
//! HTTP client by the time a caller sees the error.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Notification for a business failure without a usable `msg`.
pub const REQUEST_FAILED_MESSAGE: &str = "request failed";
/// Notification when no response was received at all.
pub const NETWORK_FAILED_MESSAGE: &str = "network connection failed";

/// Error returned by every [`crate::HttpClient`] call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The envelope carried a code outside the success set.
    #[error("{message}")]
    Business { code: String, message: String },

    /// The transport received a non-success HTTP status other than 401.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// HTTP 401: the session was cleared and a login redirect issued.
    #[error("{message}")]
    SessionExpired { message: String },

    /// No response was received (connect failure, timeout).
    #[error("{message}: {detail}")]
    Network { message: String, detail: String },

    /// A success envelope whose `data` did not match the expected shape.
    #[error("unexpected response data: {0}")]
    Decode(String),

    /// The request body could not be serialized.
    #[error("request body encode failed: {0}")]
    Encode(String),
}

impl ApiError {
    /// Stable machine-readable code for the failure kind.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Business { .. } => "E_BUSINESS",
            Self::Status { .. } => "E_HTTP_STATUS",
            Self::SessionExpired { .. } => "E_SESSION_EXPIRED",
            Self::Network { .. } => "E_NETWORK",
            Self::Decode(_) => "E_DECODE",
            Self::Encode(_) => "E_ENCODE",
        }
    }

    /// HTTP status attached to the failure, if one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::SessionExpired { .. } => Some(401),
            _ => None,
        }
    }
}

/// Failure below the HTTP layer: no response was produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// User-facing text for a non-success HTTP status.
#[must_use]
pub fn status_message(status: u16) -> String {
    match status {
        401 => "session expired, please log in again".to_owned(),
        403 => "forbidden".to_owned(),
        404 => "resource not found".to_owned(),
        500 => "server error".to_owned(),
        other => format!("request failed: {other}"),
    }
}
