//! # Extension Traits
//!
//! Convenience methods layered over the boundary traits.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`is_dir`](FileStatExt::is_dir) | Check if path is a directory |
//! | [`is_file`](FileStatExt::is_file) | Check if path exists and is not a directory |
//! | [`permission_set`](FileStatExt::permission_set) | Stat a path straight into a [`PermissionSet`] |
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, [`ToJson`] renders any serializable
//! value (issues, reports) as pretty-printed JSON.

use std::path::Path;

use crate::{FileStat, PermError, PermissionSet, SegmentKind};

/// Extension methods for any [`FileStat`] implementation.
///
/// # Example
///
/// ```rust
/// use unixperms::{FileStat, FileStatExt, PermError};
/// use std::path::Path;
///
/// fn describe<S: FileStat>(fs: &S, path: &Path) -> Result<String, PermError> {
///     let perms = fs.permission_set(path)?;
///     Ok(format!("{} {}", perms.as_numeric(), perms))
/// }
/// ```
pub trait FileStatExt: FileStat {
    /// Check if the path is a directory.
    ///
    /// Returns `Ok(false)` if the path doesn't exist.
    fn is_dir(&self, path: &Path) -> Result<bool, PermError> {
        match self.kind(path) {
            Ok(kind) => Ok(kind == SegmentKind::Directory),
            Err(PermError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path exists and is not a directory.
    ///
    /// Returns `Ok(false)` if the path doesn't exist.
    fn is_file(&self, path: &Path) -> Result<bool, PermError> {
        match self.kind(path) {
            Ok(kind) => Ok(kind == SegmentKind::File),
            Err(PermError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Stat `path` and decode its permission bits.
    ///
    /// # Errors
    ///
    /// Returns `PermError::NotFound` if the path doesn't exist.
    fn permission_set(&self, path: &Path) -> Result<PermissionSet, PermError> {
        Ok(PermissionSet::from_mode(self.stat_permissions(path)?))
    }
}

impl<S: FileStat + ?Sized> FileStatExt for S {}

#[cfg(feature = "serde")]
mod json {
    use crate::PermError;
    use serde::Serialize;

    /// JSON rendering for serializable values.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait ToJson: Serialize {
        /// Serialize as pretty-printed JSON.
        ///
        /// # Errors
        ///
        /// - `PermError::Serialization` if serialization fails
        fn to_json(&self) -> Result<String, PermError> {
            serde_json::to_string_pretty(self).map_err(|e| PermError::Serialization(e.to_string()))
        }
    }

    impl<T: Serialize + ?Sized> ToJson for T {}
}

#[cfg(feature = "serde")]
pub use json::ToJson;
