//! # Access Diagnostic
//!
//! Walks a path from the target up to the root and reports every segment
//! the invoking user cannot use, together with the permission value that
//! would fix it.
//!
//! ## Rules
//!
//! | Segment | Required | Role checked |
//! |---------|----------|--------------|
//! | directory | `execute` | owner, else group member, else public |
//! | file (innermost only) | `read`, `write` | same |
//!
//! Segments that do not exist are skipped. Failures to stat one segment or
//! resolve its owner are logged and do not stop the walk; only a failed
//! current-user lookup (or, in strict mode, a failed group lookup) aborts it.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{
    Capability, DiagnosticConfig, FileStat, Identity, NativeFs, NativeIdentity, Ownership,
    PermError, PermissionSet, Role, SegmentKind,
};

/// One segment the invoking user lacks access to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessIssue {
    /// The path segment.
    pub path: PathBuf,
    /// Whether the segment was checked as a directory or a file.
    pub kind: SegmentKind,
    /// Role the invoking user falls under for this segment.
    pub role: Role,
    /// Capabilities the role is missing, in read/write/execute order.
    pub missing: Vec<Capability>,
    /// Permissions with the missing capabilities granted.
    pub corrective: PermissionSet,
    /// Suggested command applying [`corrective`](Self::corrective).
    pub suggestion: String,
}

impl AccessIssue {
    /// Human-readable description of the missing access.
    pub fn description(&self) -> String {
        match self.kind {
            SegmentKind::Directory => format!(
                "{} can't read directory contents: {}",
                self.role.title(),
                self.path.display()
            ),
            SegmentKind::File => {
                let missing: Vec<&str> = self.missing.iter().map(|c| c.as_str()).collect();
                format!(
                    "{} can't {} file: {}",
                    self.role.title(),
                    missing.join(", "),
                    self.path.display()
                )
            }
        }
    }

    /// The corrective value as a three-digit numeral.
    pub fn corrective_numeric(&self) -> String {
        self.corrective.as_numeric()
    }
}

impl fmt::Display for AccessIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

/// Path access diagnostic over pluggable OS boundaries.
///
/// Holds no state between calls; every [`diagnose`](Self::diagnose) queries
/// the boundaries afresh.
///
/// # Example
///
/// ```rust,no_run
/// use unixperms::{AccessDiagnostic, NativeFs, NativeIdentity};
/// use std::path::Path;
///
/// let fs = NativeFs;
/// let identity = NativeIdentity::new();
/// let diagnostic = AccessDiagnostic::new(&fs, &identity);
/// for issue in diagnostic.diagnose(Path::new("/var/log/app.log"))? {
///     println!("{issue}\n  fix: {}", issue.suggestion);
/// }
/// # Ok::<(), unixperms::PermError>(())
/// ```
pub struct AccessDiagnostic<'a> {
    pub(crate) fs: &'a dyn FileStat,
    pub(crate) identity: &'a dyn Identity,
    config: DiagnosticConfig,
}

impl<'a> AccessDiagnostic<'a> {
    /// Diagnostic with the default configuration.
    pub fn new(fs: &'a dyn FileStat, identity: &'a dyn Identity) -> Self {
        Self {
            fs,
            identity,
            config: DiagnosticConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: DiagnosticConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Walk `path` from the target to the root and collect access issues,
    /// deepest segment first. An empty result means full access.
    ///
    /// # Errors
    ///
    /// - [`PermError::ExternalLookupFailure`] if the current user cannot be
    ///   resolved, or the group lookup fails in strict mode
    pub fn diagnose(&self, path: &Path) -> Result<Vec<AccessIssue>, PermError> {
        let user = self.identity.current_user()?;
        debug!("diagnosing {} as {user}", path.display());

        let mut groups = GroupCache::default();
        let mut issues = Vec::new();
        for segment in path.ancestors() {
            if segment.as_os_str().is_empty() {
                continue;
            }
            if !self.fs.exists(segment) {
                debug!("skipping missing segment {}", segment.display());
                continue;
            }
            match self.check_segment(segment, &user, &mut groups) {
                Ok(Some(issue)) => {
                    info!("{issue}");
                    issues.push(issue);
                }
                Ok(None) => {}
                Err(e @ PermError::ExternalLookupFailure { .. }) => return Err(e),
                Err(e) => warn!("skipping {}: {e}", segment.display()),
            }
        }
        Ok(issues)
    }

    fn check_segment(
        &self,
        segment: &Path,
        user: &str,
        groups: &mut GroupCache,
    ) -> Result<Option<AccessIssue>, PermError> {
        let kind = self.fs.kind(segment)?;
        let mut perms = PermissionSet::from_mode(self.fs.stat_permissions(segment)?);
        let ownership = self.fs.stat_owner(segment).unwrap_or_else(|e| {
            warn!("cannot resolve owner of {}: {e}", segment.display());
            Ownership::default()
        });
        let role = self.resolve_role(&ownership, user, groups)?;
        debug!(
            "{} {} as {role} ({})",
            kind.marker(),
            segment.display(),
            perms
        );

        let required: &[Capability] = match kind {
            SegmentKind::Directory => &[Capability::Execute],
            SegmentKind::File => &[Capability::Read, Capability::Write],
        };
        let mut missing = Vec::new();
        for &capability in required {
            if !perms.can(role, capability) {
                perms.set(role, capability);
                missing.push(capability);
            }
        }
        if missing.is_empty() {
            return Ok(None);
        }

        let suggestion = format!(
            "{} {} {}",
            self.config.chmod_command,
            perms.as_numeric(),
            segment.display()
        );
        Ok(Some(AccessIssue {
            path: segment.to_path_buf(),
            kind,
            role,
            missing,
            corrective: perms,
            suggestion,
        }))
    }

    /// Owner if the user owns the segment, group if they belong to its
    /// group, public otherwise.
    pub(crate) fn resolve_role(
        &self,
        ownership: &Ownership,
        user: &str,
        groups: &mut GroupCache,
    ) -> Result<Role, PermError> {
        if ownership.user.as_deref() == Some(user) {
            return Ok(Role::Owner);
        }
        let Some(group) = ownership.group.as_deref() else {
            return Ok(Role::Public);
        };
        let members = groups.get(self.identity, user, self.config.strict_group_lookup)?;
        if members.iter().any(|g| g == group) {
            Ok(Role::Group)
        } else {
            Ok(Role::Public)
        }
    }
}

/// Group membership of the invoking user, looked up at most once per walk.
#[derive(Debug, Default)]
pub(crate) struct GroupCache {
    members: Option<Vec<String>>,
}

impl GroupCache {
    pub(crate) fn get(
        &mut self,
        identity: &dyn Identity,
        user: &str,
        strict: bool,
    ) -> Result<&[String], PermError> {
        if self.members.is_none() {
            let members = match identity.group_members(user) {
                Ok(members) => members,
                Err(e) if strict => return Err(e),
                Err(e) => {
                    warn!("group lookup for {user} failed, treating as public: {e}");
                    Vec::new()
                }
            };
            self.members = Some(members);
        }
        Ok(self.members.as_deref().unwrap_or_default())
    }
}

/// Diagnose `path` against the running system with default settings.
///
/// # Errors
///
/// See [`AccessDiagnostic::diagnose`].
pub fn diagnose_path(path: &Path) -> Result<Vec<AccessIssue>, PermError> {
    let fs = NativeFs;
    let identity = NativeIdentity::new();
    AccessDiagnostic::new(&fs, &identity).diagnose(path)
}
