//! Core types for the permission model.

use std::fmt;
use std::str::FromStr;

use crate::PermError;

/// Symbolic block for each capability level, indexed by level (0–7).
///
/// The table is the full power set of the three capability bits, so every
/// 3-character `r`/`w`/`x`-or-`-` block appears exactly once.
pub const SYMBOLIC_ALPHABET: [&str; 8] = ["---", "--x", "-w-", "-wx", "r--", "r-x", "rw-", "rwx"];

/// Look up the level (0–7) of a 3-character symbolic block.
#[inline]
pub(crate) fn level_of_block(block: &[u8]) -> Option<u8> {
    SYMBOLIC_ALPHABET
        .iter()
        .position(|s| s.as_bytes() == block)
        .map(|level| level as u8)
}

/// One of the three permission subjects in the Unix model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    /// The owning user.
    Owner,
    /// Members of the owning group.
    Group,
    /// Everyone else.
    Public,
}

impl Role {
    /// All roles in owner/group/public order.
    pub const ALL: [Role; 3] = [Role::Owner, Role::Group, Role::Public];

    /// Position of this role in the permission triple.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Role::Owner => 0,
            Role::Group => 1,
            Role::Public => 2,
        }
    }

    /// Lowercase name (`owner`, `group`, `public`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Group => "group",
            Role::Public => "public",
        }
    }

    /// Capitalized name used in diagnostic messages.
    pub const fn title(self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Group => "Group",
            Role::Public => "Public",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "group" => Ok(Role::Group),
            "public" => Ok(Role::Public),
            _ => Err(PermError::InvalidArgument {
                argument: "role",
                value: s.to_string(),
            }),
        }
    }
}

/// An access right a role may or may not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Capability {
    /// `r`
    Read,
    /// `w`
    Write,
    /// `x`
    Execute,
}

impl Capability {
    /// All capabilities in read/write/execute order.
    pub const ALL: [Capability; 3] = [Capability::Read, Capability::Write, Capability::Execute];

    /// Position of this capability inside a symbolic block.
    #[inline]
    pub const fn position(self) -> usize {
        match self {
            Capability::Read => 0,
            Capability::Write => 1,
            Capability::Execute => 2,
        }
    }

    /// The letter used in symbolic blocks.
    #[inline]
    pub const fn letter(self) -> u8 {
        match self {
            Capability::Read => b'r',
            Capability::Write => b'w',
            Capability::Execute => b'x',
        }
    }

    /// Lowercase name (`read`, `write`, `execute`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::Read => "read",
            Capability::Write => "write",
            Capability::Execute => "execute",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = PermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(Capability::Read),
            "write" => Ok(Capability::Write),
            "execute" => Ok(Capability::Execute),
            _ => Err(PermError::InvalidArgument {
                argument: "capability",
                value: s.to_string(),
            }),
        }
    }
}

/// Kind of a path segment, as far as the diagnostic cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SegmentKind {
    /// A directory; needs `execute` to traverse.
    Directory,
    /// Anything else; needs `read` and `write`.
    File,
}

impl SegmentKind {
    /// File-type marker used in 10-character symbolic strings.
    pub const fn marker(self) -> char {
        match self {
            SegmentKind::Directory => 'd',
            SegmentKind::File => '-',
        }
    }
}

/// Owning user and group names of a path.
///
/// A name is `None` when the id could not be resolved to a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ownership {
    /// Owning user name.
    pub user: Option<String>,
    /// Owning group name.
    pub group: Option<String>,
}

impl Ownership {
    /// Ownership with both names resolved.
    pub fn new(user: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            group: Some(group.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_complete_power_set() {
        for (level, block) in SYMBOLIC_ALPHABET.iter().enumerate() {
            let bits = block.as_bytes();
            let expected = [
                if level & 4 != 0 { b'r' } else { b'-' },
                if level & 2 != 0 { b'w' } else { b'-' },
                if level & 1 != 0 { b'x' } else { b'-' },
            ];
            assert_eq!(bits, &expected);
            assert_eq!(level_of_block(bits), Some(level as u8));
        }
    }

    #[test]
    fn unknown_block_has_no_level() {
        assert_eq!(level_of_block(b"xyz"), None);
        assert_eq!(level_of_block(b"wr-"), None);
        assert_eq!(level_of_block(b"rw"), None);
    }

    #[test]
    fn role_parse() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("group".parse::<Role>().unwrap(), Role::Group);
        assert_eq!("public".parse::<Role>().unwrap(), Role::Public);
        let err = "admin".parse::<Role>().unwrap_err();
        assert!(matches!(err, PermError::InvalidArgument { argument: "role", .. }));
    }

    #[test]
    fn capability_parse() {
        assert_eq!("read".parse::<Capability>().unwrap(), Capability::Read);
        assert_eq!("write".parse::<Capability>().unwrap(), Capability::Write);
        assert_eq!("execute".parse::<Capability>().unwrap(), Capability::Execute);
        let err = "delete".parse::<Capability>().unwrap_err();
        assert!(matches!(
            err,
            PermError::InvalidArgument {
                argument: "capability",
                ..
            }
        ));
    }

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert_eq!(Role::Group.title(), "Group");
    }

    #[test]
    fn types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Role>();
        assert_send_sync::<Capability>();
        assert_send_sync::<SegmentKind>();
        assert_send_sync::<Ownership>();
    }
}
