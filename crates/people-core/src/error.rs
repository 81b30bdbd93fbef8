//! Error types for the people directory client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole request path.
///
/// The same value travels from the transport through the interceptor chain
/// and the directory client up to the controller, so each layer can observe
/// it without rewrapping.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectoryError {
    /// No HTTP status is available (connection refused, DNS, timeout, ...)
    #[error("Network error: {message}")]
    Network { message: String },

    /// The server answered with a non-success status
    #[error("HTTP {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// A successful response body could not be decoded
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (configuration file access)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl DirectoryError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a Status error
    pub fn status(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Returns the HTTP status code, if the server produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the reason phrase that accompanied the status, if any.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Status { status_text, .. } => Some(status_text.as_str()),
            _ => None,
        }
    }

    /// Check if this failure happened before any status was received.
    ///
    /// Everything that is not a `Status` error counts as a network-level
    /// failure from the point of view of HTTP diagnostics.
    pub fn is_network(&self) -> bool {
        self.status_code().is_none()
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DirectoryError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DirectoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DirectoryError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("Invalid TOML: {}", err))
    }
}

/// A type alias for `Result<T, DirectoryError>`.
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let err = DirectoryError::status(503, "Service Unavailable", "");
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.status_text(), Some("Service Unavailable"));
        assert!(err.is_server_error());
        assert!(!err.is_client_error());
        assert!(!err.is_network());
    }

    #[test]
    fn test_network_has_no_status() {
        let err = DirectoryError::network("connection refused");
        assert_eq!(err.status_code(), None);
        assert!(err.is_network());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_from_serde_json_is_decode() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DirectoryError = parse_err.into();
        assert!(matches!(err, DirectoryError::Decode { .. }));
    }
}
