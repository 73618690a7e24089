//! Filesystem stat queries consumed by the access diagnostic.

use std::path::Path;

use crate::{Ownership, PermError, SegmentKind};

/// Read-only stat queries against a filesystem.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self`.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FileStat`.
pub trait FileStat: Send + Sync {
    /// Check if a path exists (following symlinks).
    ///
    /// Returns `false` on any failure to stat the path.
    fn exists(&self, path: &Path) -> bool;

    /// Kind of the entry at `path`.
    ///
    /// # Errors
    ///
    /// - [`PermError::NotFound`] if the path does not exist
    fn kind(&self, path: &Path) -> Result<SegmentKind, PermError>;

    /// Raw mode bits of `path`, as returned by `stat`.
    ///
    /// Callers only need the low 9 bits; implementations may include
    /// file-type and special bits.
    ///
    /// # Errors
    ///
    /// - [`PermError::NotFound`] if the path does not exist
    fn stat_permissions(&self, path: &Path) -> Result<u32, PermError>;

    /// Owning user and group names of `path`.
    ///
    /// Ids that do not resolve to a name are reported as `None`, not as an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`PermError::NotFound`] if the path does not exist
    fn stat_owner(&self, path: &Path) -> Result<Ownership, PermError>;
}
