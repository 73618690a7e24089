//! # unixperms
//!
//! Unix permission algebra, and a diagnostic that uses it to explain why a
//! process cannot reach a file.
//!
//! The crate never changes real permissions. It computes the numeric value
//! a corrective `chmod` would need and reports it as a suggestion.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use unixperms::{Capability, PermissionSet, Role};
//!
//! let mut perms = PermissionSet::from_symbolic("rw-r-----")?;
//! assert_eq!(perms.as_numeric(), "640");
//! assert!(!perms.can(Role::Public, Capability::Read));
//!
//! let fixed = perms.set(Role::Public, Capability::Read).as_numeric();
//! assert_eq!(fixed, "644");
//! # Ok::<(), unixperms::PermError>(())
//! ```
//!
//! Diagnosing a path on the running system:
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! for issue in unixperms::diagnose_path(Path::new("/srv/app/data.db"))? {
//!     println!("{issue}: {}", issue.suggestion);
//! }
//! # Ok::<(), unixperms::PermError>(())
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PermissionSet`] | Owner/group/public triple with symbolic and numeric conversions |
//! | [`NumericPermission`] | Validated 3- or 4-digit numeral |
//! | [`Role`], [`Capability`] | The subjects and rights a permission talks about |
//! | [`AccessDiagnostic`] | Walks a path and reports missing access |
//! | [`AccessIssue`] | One deficient segment with its corrective value |
//! | [`SegmentReport`] | Single-path inspection report |
//! | [`PermError`] | Error type with context |
//!
//! ---
//!
//! ## Encodings
//!
//! | Level | Symbolic | Capabilities |
//! |-------|----------|--------------|
//! | 0 | `---` | none |
//! | 4 | `r--` | read |
//! | 6 | `rw-` | read, write |
//! | 7 | `rwx` | read, write, execute |
//!
//! The full table is [`SYMBOLIC_ALPHABET`]. Numerals shorter than three
//! digits are left-padded with zeros; a leading fourth digit (special bits)
//! is accepted and discarded.
//!
//! ---
//!
//! ## OS Boundary
//!
//! The diagnostic reaches the system only through [`FileStat`] and
//! [`Identity`]. [`NativeFs`] and [`NativeIdentity`] implement them with
//! `std::fs` and the user/group databases; tests substitute in-memory
//! fixtures.
//!
//! ---
//!
//! ## Logging
//!
//! The library logs through the [`log`] facade: `debug` per visited
//! segment, `info` per issue found, `warn` for tolerated lookup failures.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`AccessIssue`], [`SegmentReport`], [`PermissionSet`], etc., and [`ToJson`] |

// Private modules
mod config;
mod diagnostic;
mod error;
mod ext;
mod inspect;
mod mode;
mod native;
mod numeric;
mod permission_set;
mod traits;
mod types;

// Public re-exports - error types
pub use error::PermError;

// Public re-exports - core types
pub use numeric::NumericPermission;
pub use permission_set::PermissionSet;
pub use types::{Capability, Ownership, Role, SegmentKind, SYMBOLIC_ALPHABET};

// Public re-exports - special bits
pub use mode::{numeric_mode, render_mode, SpecialBits};

// Public re-exports - boundary traits and native implementations
pub use native::{GroupSource, NativeFs, NativeIdentity};
pub use traits::{FileStat, Identity};

// Public re-exports - diagnostic
pub use config::DiagnosticConfig;
pub use diagnostic::{diagnose_path, AccessDiagnostic, AccessIssue};
pub use inspect::SegmentReport;

// Public re-exports - infrastructure
pub use ext::FileStatExt;

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::ToJson;
