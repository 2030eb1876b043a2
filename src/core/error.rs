//! Error types for the Arachnid Shield client.
//!
//! This module provides structured, typed errors for all failure scenarios.
//! The library never panics; all errors are returned as `Result` values.

use thiserror::Error;

/// The main error type for scan operations.
///
/// Every client operation resolves into either a typed result or one of
/// these variants; nothing is left to propagate as a panic across the
/// library boundary.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The server rejected the request with a non-2xx status.
    ///
    /// `detail` carries the server's `detail` field when the error body
    /// provided one, so displaying this error yields exactly the message the
    /// API reported.
    #[error("{detail}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided error detail, or the raw response when absent.
        detail: String,
    },

    /// The request never completed: connection failure, DNS failure, or a
    /// malformed response body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A local I/O error occurred before any request was sent. Only file
    /// scanning produces this.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The client could not be constructed from the given configuration.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl ScanError {
    /// Returns the HTTP status code if this is a server-reported error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the error rendered as the detail string callers would report.
    pub fn detail(&self) -> String {
        self.to_string()
    }

    /// Creates a `Configuration` error.
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// A specialized `Result` type for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_detail_verbatim() {
        let err = ScanError::Api {
            status: 400,
            detail: "invalid url".into(),
        };
        assert_eq!(err.to_string(), "invalid url");
        assert_eq!(err.detail(), "invalid url");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ScanError::from(io);
        assert!(matches!(err, ScanError::Io(_)));
        assert_eq!(err.status(), None);
    }
}
