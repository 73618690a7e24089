//! Error types for permission parsing and access diagnostics.

use std::path::PathBuf;

/// Error type shared by the permission algebra and the access diagnostic.
///
/// Every variant is a recoverable, caller-facing condition. Variants carry
/// the offending input or path so messages are actionable on their own.
///
/// # Examples
///
/// ```rust
/// use unixperms::{PermError, PermissionSet};
///
/// let err = PermissionSet::from_numeric(999).unwrap_err();
/// assert!(matches!(err, PermError::InvalidFormat { .. }));
/// assert!(err.to_string().contains("999"));
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PermError {
    /// Malformed symbolic or numeric permission input.
    #[error("invalid permission format: {input:?} ({reason})")]
    InvalidFormat {
        /// The rejected input, verbatim.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Unknown role or capability name.
    #[error("invalid argument: {argument} {value:?}")]
    InvalidArgument {
        /// Which argument was rejected (`role` or `capability`).
        argument: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A user or group lookup at the OS boundary failed.
    #[error("{operation}: lookup failed: {details}")]
    ExternalLookupFailure {
        /// The lookup that failed.
        operation: &'static str,
        /// Error output or reason reported by the boundary.
        details: String,
    },

    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl PermError {
    pub(crate) fn invalid_format(input: impl Into<String>, reason: &'static str) -> Self {
        PermError::InvalidFormat {
            input: input.into(),
            reason,
        }
    }

    /// Attach a path to an I/O error, keeping `NotFound` distinct.
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => PermError::NotFound { path },
            _ => PermError::Io {
                operation,
                path,
                source,
            },
        }
    }
}

impl From<std::io::Error> for PermError {
    fn from(error: std::io::Error) -> Self {
        PermError::io("io", PathBuf::new(), error)
    }
}
