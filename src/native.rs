//! Boundary implementations backed by the running system.

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::process::Command;

use log::debug;
use users::{get_effective_uid, get_group_by_gid, get_user_by_name, get_user_by_uid, get_user_groups};

use crate::{FileStat, Identity, Ownership, PermError, SegmentKind};

/// [`FileStat`] over `std::fs`, with names resolved through the user and
/// group databases.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFs;

impl NativeFs {
    fn metadata(path: &Path) -> Result<fs::Metadata, PermError> {
        fs::metadata(path).map_err(|e| PermError::io("stat", path, e))
    }
}

impl FileStat for NativeFs {
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn kind(&self, path: &Path) -> Result<SegmentKind, PermError> {
        let meta = Self::metadata(path)?;
        Ok(if meta.is_dir() {
            SegmentKind::Directory
        } else {
            SegmentKind::File
        })
    }

    fn stat_permissions(&self, path: &Path) -> Result<u32, PermError> {
        Ok(Self::metadata(path)?.mode())
    }

    fn stat_owner(&self, path: &Path) -> Result<Ownership, PermError> {
        let meta = Self::metadata(path)?;
        let user = get_user_by_uid(meta.uid()).map(|u| u.name().to_string_lossy().into_owned());
        let group = get_group_by_gid(meta.gid()).map(|g| g.name().to_string_lossy().into_owned());
        Ok(Ownership { user, group })
    }
}

/// Where [`NativeIdentity`] gets group membership from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroupSource {
    /// Read the group database directly.
    #[default]
    Database,
    /// Run `<program> <user>` and parse its output, like `groups(1)`.
    Command {
        /// Program to run.
        program: String,
    },
}

impl GroupSource {
    /// Run the system `groups` command.
    pub fn groups_command() -> Self {
        GroupSource::Command {
            program: "groups".to_string(),
        }
    }
}

/// [`Identity`] for the current process.
#[derive(Debug, Clone, Default)]
pub struct NativeIdentity {
    groups: GroupSource,
}

impl NativeIdentity {
    /// Identity reading group membership from the group database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity using `source` for group membership.
    pub fn with_group_source(source: GroupSource) -> Self {
        Self { groups: source }
    }

    fn groups_from_database(user: &str) -> Result<Vec<String>, PermError> {
        let entry = get_user_by_name(user).ok_or_else(|| PermError::ExternalLookupFailure {
            operation: "group_members",
            details: format!("unknown user {user}"),
        })?;
        let groups = get_user_groups(entry.name(), entry.primary_group_id()).ok_or_else(|| {
            PermError::ExternalLookupFailure {
                operation: "group_members",
                details: format!("cannot list groups of {user}"),
            }
        })?;
        Ok(groups
            .iter()
            .map(|g| g.name().to_string_lossy().into_owned())
            .collect())
    }

    fn groups_from_command(program: &str, user: &str) -> Result<Vec<String>, PermError> {
        debug!("running {program} {user}");
        let output = Command::new(program).arg(user).output().map_err(|e| {
            PermError::ExternalLookupFailure {
                operation: "group_members",
                details: format!("cannot run {program}: {e}"),
            }
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() || !stderr.trim().is_empty() {
            let details = match stderr.trim() {
                "" => format!("{program} exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(PermError::ExternalLookupFailure {
                operation: "group_members",
                details,
            });
        }
        Ok(parse_groups_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl Identity for NativeIdentity {
    fn current_user(&self) -> Result<String, PermError> {
        let uid = get_effective_uid();
        get_user_by_uid(uid)
            .map(|u| u.name().to_string_lossy().into_owned())
            .ok_or_else(|| PermError::ExternalLookupFailure {
                operation: "current_user",
                details: format!("no user with uid {uid}"),
            })
    }

    fn group_members(&self, user: &str) -> Result<Vec<String>, PermError> {
        match &self.groups {
            GroupSource::Database => Self::groups_from_database(user),
            GroupSource::Command { program } => Self::groups_from_command(program, user),
        }
    }
}

/// Parse `groups` output. GNU prints `user : g1 g2` when given a user name,
/// BSD prints just `g1 g2`.
pub(crate) fn parse_groups_output(stdout: &str) -> Vec<String> {
    let list = match stdout.split_once(" : ") {
        Some((_, rest)) => rest,
        None => stdout,
    };
    list.split_whitespace().map(str::to_string).collect()
}
