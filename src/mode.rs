//! Raw mode rendering with setuid, setgid and sticky bits.

use crate::{PermissionSet, Role};

/// Special bits held above the permission triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialBits {
    /// Set-user-id (`0o4000`).
    pub setuid: bool,
    /// Set-group-id (`0o2000`).
    pub setgid: bool,
    /// Sticky (`0o1000`).
    pub sticky: bool,
}

impl SpecialBits {
    /// Decode from raw mode bits.
    pub const fn from_mode(mode: u32) -> Self {
        Self {
            setuid: mode & 0o4000 != 0,
            setgid: mode & 0o2000 != 0,
            sticky: mode & 0o1000 != 0,
        }
    }

    /// The special-bits digit (0–7).
    pub const fn digit(&self) -> u8 {
        (self.setuid as u8) << 2 | (self.setgid as u8) << 1 | self.sticky as u8
    }

    fn marker(&self, role: Role) -> Option<(char, char)> {
        match role {
            Role::Owner if self.setuid => Some(('s', 'S')),
            Role::Group if self.setgid => Some(('s', 'S')),
            Role::Public if self.sticky => Some(('t', 'T')),
            _ => None,
        }
    }
}

/// Four-digit numeral including the special digit, e.g. `"4755"`.
pub fn numeric_mode(mode: u32) -> String {
    let special = SpecialBits::from_mode(mode).digit();
    format!("{special}{}", PermissionSet::from_mode(mode).as_numeric())
}

/// Render raw mode bits the way `ls -l` does, e.g. `"rwsr-xr-t"`.
///
/// A special bit replaces the execute letter of its role with a lowercase
/// marker when execute is set, uppercase when it is not.
pub fn render_mode(mode: u32) -> String {
    let perms = PermissionSet::from_mode(mode);
    let special = SpecialBits::from_mode(mode);

    let mut out = String::with_capacity(9);
    for role in Role::ALL {
        let block = perms.block(role);
        out.push_str(&block[..2]);
        let exec = block.as_bytes()[2] == b'x';
        match special.marker(role) {
            Some((lower, _)) if exec => out.push(lower),
            Some((_, upper)) => out.push(upper),
            None => out.push(if exec { 'x' } else { '-' }),
        }
    }
    out
}
