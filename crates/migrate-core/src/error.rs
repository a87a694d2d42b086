//! Error types for GLIDE migration analysis.
//!
//! Extraction never fails on odd input: unparseable declarations or source
//! lines are skipped, and missing mapping targets are reported as data. The
//! variants here cover the remaining caller-facing failures: remote fetches,
//! malformed caller input, artifact I/O and configuration.
//!
//! # Examples
//!
//! ```
//! use glide_migrate_core::{Error, Result};
//!
//! fn check_count(count: usize) -> Result<usize> {
//!     if count == 0 {
//!         return Err(Error::InvalidArgument("count must be positive".to_string()));
//!     }
//!     Ok(count)
//! }
//!
//! let err = check_count(0).unwrap_err();
//! assert!(err.is_invalid_argument());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for GLIDE migration analysis.
///
/// Every crate in the workspace reports failures through this type so that
/// tool handlers and the CLI can render one consistent message.
#[derive(Error, Debug)]
pub enum Error {
    /// A remote fetch failed.
    ///
    /// Raised for transport errors and for non-success HTTP statuses. There
    /// is no retry: the invocation that needed the text fails.
    #[error("Failed to fetch {url}: {message}")]
    FetchFailed {
        /// URL that was requested
        url: String,
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Human-readable failure description
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when caller input is out of range, such as an ingestion slice
    /// that starts past the end of the command list.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Validation error for curated or loaded data.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field or dataset that failed validation
        field: String,
        /// Detailed reason for the validation failure
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Filesystem error while reading or writing an artifact.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Report template rendering failed.
    #[error("Template error: {message}")]
    Template {
        /// Description of the rendering failure
        message: String,
    },
}

impl Error {
    /// Builds an [`Error::Io`] for the given path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is a fetch error.
    ///
    /// # Examples
    ///
    /// ```
    /// use glide_migrate_core::Error;
    ///
    /// let err = Error::FetchFailed {
    ///     url: "https://example.com".to_string(),
    ///     status: Some(404),
    ///     message: "404 Not Found".to_string(),
    /// };
    /// assert!(err.is_fetch_error());
    /// ```
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` if this is a validation error.
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this error was caused by the caller's input rather
    /// than by the environment.
    ///
    /// Tool handlers use this to decide between an error payload and a
    /// protocol-level failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use glide_migrate_core::Error;
    ///
    /// assert!(Error::InvalidArgument("bad".to_string()).is_caller_error());
    /// assert!(!Error::ConfigError { message: "x".to_string() }.is_caller_error());
    /// ```
    #[must_use]
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::ValidationError { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias for migration analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_detection() {
        let err = Error::FetchFailed {
            url: "https://example.com/BaseClient.ts".to_string(),
            status: Some(500),
            message: "500 Internal Server Error".to_string(),
        };
        assert!(err.is_fetch_error());
        assert!(!err.is_invalid_argument());
        assert!(!err.is_caller_error());
    }

    #[test]
    fn test_invalid_argument_is_caller_error() {
        let err = Error::InvalidArgument("start out of range".to_string());
        assert!(err.is_invalid_argument());
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_validation_error_detection() {
        let err = Error::ValidationError {
            field: "ioredis dataset".to_string(),
            reason: "duplicate symbol 'get'".to_string(),
        };
        assert!(err.is_validation_error());
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_io_error_display_contains_path() {
        let err = Error::io(
            "/tmp/out/commands.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("/tmp/out/commands.json"));
        assert!(display.contains("denied"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::SerializationError { source: Some(_), .. }));
    }
}
