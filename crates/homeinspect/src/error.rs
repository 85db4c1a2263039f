//! Error types for homeinspect.
//!
//! This module defines all error types used throughout the homeinspect crate.
//! Store and compiler failures map onto four caller-facing kinds
//! (unavailable medium, failed write, corrupt state, invalid layout); the
//! remaining variants cover configuration and plumbing.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for homeinspect operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Store Errors ===
    /// The persistence medium could not be opened.
    #[error("record store unavailable at {path}: {source}")]
    StoreUnavailable {
        /// Location of the medium.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A write did not complete. The store is unchanged.
    #[error("failed to persist entry: {source}")]
    Persistence {
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Persisted data could not be decoded.
    #[error("corrupt record store state: {message}")]
    CorruptState {
        /// Description of what could not be decoded.
        message: String,
    },

    /// A read query failed for a reason other than corruption.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Document Compiler Errors ===
    /// A layout constant is out of range.
    #[error("invalid layout: {message}")]
    InvalidLayout {
        /// Which constraint was violated.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for homeinspect operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a store-unavailable error for the medium at `path`.
    #[must_use]
    pub fn store_unavailable(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Create a persistence error from a failed write.
    #[must_use]
    pub fn persistence(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Persistence {
            source: source.into(),
        }
    }

    /// Create a corrupt-state error.
    #[must_use]
    pub fn corrupt_state(message: impl Into<String>) -> Self {
        Self::CorruptState {
            message: message.into(),
        }
    }

    /// Create an invalid-layout error.
    #[must_use]
    pub fn invalid_layout(message: impl Into<String>) -> Self {
        Self::InvalidLayout {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error means the medium could not be opened.
    #[must_use]
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    /// Check if this error is a failed write.
    #[must_use]
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }

    /// Check if this error reports undecodable persisted data.
    #[must_use]
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, Self::CorruptState { .. })
    }

    /// Check if this error is a layout configuration problem.
    #[must_use]
    pub fn is_invalid_layout(&self) -> bool {
        matches!(self, Self::InvalidLayout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::corrupt_state("bad timestamp in row 3");
        assert_eq!(
            err.to_string(),
            "corrupt record store state: bad timestamp in row 3"
        );

        let err = Error::invalid_layout("line_height must be greater than 0");
        assert_eq!(
            err.to_string(),
            "invalid layout: line_height must be greater than 0"
        );
    }

    #[test]
    fn test_error_kind_predicates() {
        let unavailable = Error::store_unavailable("/tmp/x.db", "permission denied");
        assert!(unavailable.is_store_unavailable());
        assert!(!unavailable.is_persistence_error());

        let persistence = Error::persistence("disk full");
        assert!(persistence.is_persistence_error());
        assert!(!persistence.is_corrupt_state());

        assert!(Error::corrupt_state("x").is_corrupt_state());
        assert!(Error::invalid_layout("x").is_invalid_layout());
        assert!(!Error::internal("x").is_invalid_layout());
    }

    #[test]
    fn test_store_unavailable_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::store_unavailable("/root/forbidden/entries.db", io_err);
        let msg = err.to_string();
        assert!(msg.contains("/root/forbidden/entries.db"));
        assert!(msg.contains("access denied"));
    }

    #[test]
    fn test_persistence_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::persistence("UNIQUE constraint failed: entries.id");
        assert!(err.source().is_some());
        assert!(err.to_string().contains("UNIQUE constraint failed"));
    }

    #[test]
    fn test_internal_error() {
        let err = Error::internal("something went wrong");
        assert_eq!(err.to_string(), "internal error: something went wrong");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let sqlite_err = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        )
        .unwrap_err();
        let err: Error = sqlite_err.into();
        assert!(matches!(err, Error::DatabaseQuery(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_database_migration_error_display() {
        let err = Error::DatabaseMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "invalid wrap width".to_string(),
        };
        assert!(err.to_string().contains("invalid wrap width"));
    }
}
