//! Identity and group membership queries.

use crate::PermError;

/// Who is asking, and which groups they belong to.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Identity`.
pub trait Identity: Send + Sync {
    /// Name of the invoking (effective) user.
    ///
    /// # Errors
    ///
    /// - [`PermError::ExternalLookupFailure`] if the user cannot be resolved
    fn current_user(&self) -> Result<String, PermError>;

    /// Names of the groups `user` belongs to, in the order the system lists
    /// them.
    ///
    /// # Errors
    ///
    /// - [`PermError::ExternalLookupFailure`] if the lookup fails; failures
    ///   are reported, never replaced by an empty list
    fn group_members(&self, user: &str) -> Result<Vec<String>, PermError>;
}
