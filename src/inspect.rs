//! Per-path inspection report.

use std::fmt;
use std::path::{Path, PathBuf};

use log::warn;

use crate::diagnostic::GroupCache;
use crate::mode::{numeric_mode, render_mode};
use crate::{AccessDiagnostic, Capability, Ownership, PermError, PermissionSet, Role, SegmentKind};

/// What the invoking user can do with a single path, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentReport {
    /// The inspected path.
    pub path: PathBuf,
    /// Entry kind; `None` when the path does not exist.
    pub kind: Option<SegmentKind>,
    /// Raw mode bits including special bits; `None` when the path does not exist.
    pub mode: Option<u32>,
    /// Owning user and group.
    pub ownership: Ownership,
    /// The invoking user.
    pub user: String,
    /// Role the invoking user falls under.
    pub role: Role,
}

impl SegmentReport {
    /// Whether the path exists.
    pub fn exists(&self) -> bool {
        self.kind.is_some()
    }

    /// Whether the invoking user owns the path.
    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }

    /// Whether the invoking user is checked as a member of the owning group.
    pub fn in_group(&self) -> bool {
        self.role == Role::Group
    }

    /// Whether the invoking user's role holds `capability`.
    pub fn can(&self, capability: Capability) -> bool {
        self.mode
            .is_some_and(|mode| PermissionSet::from_mode(mode).can(self.role, capability))
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

impl fmt::Display for SegmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Path: {}", self.path.display())?;
        writeln!(f, "Exists: {}", yes_no(self.exists()))?;
        if let (Some(kind), Some(mode)) = (self.kind, self.mode) {
            let kind = match kind {
                SegmentKind::Directory => "directory",
                SegmentKind::File => "file",
            };
            writeln!(f, "Type: {kind}")?;
            writeln!(f, "Permissions: {} ({})", numeric_mode(mode), render_mode(mode))?;
        }
        writeln!(f, "Owner: {}", self.ownership.user.as_deref().unwrap_or("?"))?;
        writeln!(f, "Group: {}", self.ownership.group.as_deref().unwrap_or("?"))?;
        writeln!(f, "Current user: {}", self.user)?;
        writeln!(f, "Current user is owner: {}", yes_no(self.is_owner()))?;
        writeln!(f, "Current user is in group: {}", yes_no(self.in_group()))?;
        writeln!(f, "Readable: {}", yes_no(self.can(Capability::Read)))?;
        write!(f, "Writable: {}", yes_no(self.can(Capability::Write)))
    }
}

impl AccessDiagnostic<'_> {
    /// Inspect a single path without walking its parents.
    ///
    /// A missing path yields a report with `kind` and `mode` unset.
    ///
    /// # Errors
    ///
    /// - [`PermError::ExternalLookupFailure`] if the current user cannot be
    ///   resolved, or the group lookup fails in strict mode
    /// - Stat errors other than the path being absent
    ///
    /// An owner that cannot be resolved is logged and reported as unknown.
    pub fn inspect(&self, path: &Path) -> Result<SegmentReport, PermError> {
        let user = self.identity.current_user()?;
        let mut report = SegmentReport {
            path: path.to_path_buf(),
            kind: None,
            mode: None,
            ownership: Ownership::default(),
            user,
            role: Role::Public,
        };
        if !self.fs.exists(path) {
            return Ok(report);
        }

        report.kind = Some(self.fs.kind(path)?);
        report.mode = Some(self.fs.stat_permissions(path)?);
        report.ownership = self.fs.stat_owner(path).unwrap_or_else(|e| {
            warn!("cannot resolve owner of {}: {e}", path.display());
            Ownership::default()
        });
        report.role = self.resolve_role(&report.ownership, &report.user, &mut GroupCache::default())?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(role: Role) -> SegmentReport {
        SegmentReport {
            path: PathBuf::from("/srv/app.log"),
            kind: Some(SegmentKind::File),
            mode: Some(0o100640),
            ownership: Ownership::new("app", "adm"),
            user: "alice".into(),
            role,
        }
    }

    #[test]
    fn group_member_can_read_only() {
        let r = report(Role::Group);
        assert!(r.exists());
        assert!(r.in_group());
        assert!(!r.is_owner());
        assert!(r.can(Capability::Read));
        assert!(!r.can(Capability::Write));
    }

    #[test]
    fn display_block() {
        let text = report(Role::Public).to_string();
        assert!(text.contains("Path: /srv/app.log"));
        assert!(text.contains("Permissions: 0640 (rw-r-----)"));
        assert!(text.contains("Owner: app"));
        assert!(text.contains("Current user is owner: No"));
        assert!(text.ends_with("Writable: No"));
    }

    #[test]
    fn missing_path_has_no_capabilities() {
        let r = SegmentReport {
            kind: None,
            mode: None,
            ..report(Role::Public)
        };
        assert!(!r.exists());
        assert!(!r.can(Capability::Read));
        assert!(r.to_string().contains("Exists: No"));
        assert!(!r.to_string().contains("Permissions:"));
    }
}
