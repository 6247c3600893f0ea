//! Error types for monitor API operations.

use thiserror::Error;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the monitor API.
///
/// Failures surface immediately; nothing here is retried internally and
/// no partial-success state is modeled.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure or a non-success status from the server.
    #[error("HTTP request failed: {message}")]
    Http {
        /// Error message.
        message: String,
        /// HTTP status code if available.
        status: Option<u16>,
    },

    /// The server answered with a success status other than the one the
    /// endpoint documents.
    #[error("unexpected status {got} (expected {expected})")]
    UnexpectedStatus {
        /// Status the endpoint documents.
        expected: u16,
        /// Status actually received.
        got: u16,
    },

    /// Response body did not decode into the documented shape.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Create an HTTP error.
    pub fn http(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Http {
            message: message.into(),
            status,
        }
    }

    /// The HTTP status associated with this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => *status,
            Error::UnexpectedStatus { got, .. } => Some(*got),
            Error::InvalidResponse(_) => None,
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => Self::Http {
                message: format!("HTTP {code}"),
                status: Some(code),
            },
            other => Self::Http {
                message: other.to_string(),
                status: None,
            },
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}
