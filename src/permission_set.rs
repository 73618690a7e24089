//! The permission algebra: a triple of 0–7 capability levels.

use std::fmt;
use std::str::FromStr;

use crate::types::level_of_block;
use crate::{Capability, NumericPermission, PermError, Role, SYMBOLIC_ALPHABET};

/// Unix permission triple for owner, group and public.
///
/// Each role holds a level in `0..=7`, convertible to a single octal digit
/// or a 3-character symbolic block (`rw-`). Mutators return `&mut Self` so
/// calls chain:
///
/// ```rust
/// use unixperms::{Capability, PermissionSet, Role};
///
/// let mut perms = PermissionSet::from_numeric(666)?;
/// assert_eq!(perms.as_symbolic(), "rw-rw-rw-");
///
/// perms.unset(Role::Group, Capability::Read);
/// assert_eq!(perms.as_numeric(), "626");
///
/// let fixed = perms.set(Role::Group, Capability::Read).as_symbolic();
/// assert_eq!(fixed, "rw-rw-rw-");
/// # Ok::<(), unixperms::PermError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionSet {
    levels: [u8; 3],
}

impl PermissionSet {
    /// Build from symbolic form: `rw-r--r--`, or `-rw-r--r--` with a
    /// leading file-type marker that is discarded.
    ///
    /// # Errors
    ///
    /// [`PermError::InvalidFormat`] for any other length or for a block that
    /// is not in [`SYMBOLIC_ALPHABET`].
    pub fn from_symbolic(input: &str) -> Result<Self, PermError> {
        let body = match input.chars().count() {
            10 => input.char_indices().nth(1).map_or("", |(i, _)| &input[i..]),
            9 => input,
            _ => return Err(PermError::invalid_format(input, "expected 9 or 10 characters")),
        };
        let bytes = body.as_bytes();
        if bytes.len() != 9 {
            return Err(PermError::invalid_format(input, "expected 9 or 10 characters"));
        }

        let mut levels = [0u8; 3];
        for (level, block) in levels.iter_mut().zip(bytes.chunks(3)) {
            *level = level_of_block(block)
                .ok_or_else(|| PermError::invalid_format(input, "unknown symbolic block"))?;
        }
        Ok(Self { levels })
    }

    /// Build from a decimal numeral of 3 or 4 digits, given as an integer or
    /// a string.
    ///
    /// The numeral is read digit by digit, so `644` (decimal) means
    /// `rw-r--r--`; an integer written in octal, such as `0o644`, is not
    /// what this expects. Short input is left-padded (`6` reads as `006`)
    /// and a leading fourth digit is discarded.
    ///
    /// # Errors
    ///
    /// [`PermError::InvalidFormat`] if the numeral does not reduce to three
    /// digits in `0..=7`.
    pub fn from_numeric<N: fmt::Display>(value: N) -> Result<Self, PermError> {
        let numeral = NumericPermission::parse(&value.to_string())?;
        Ok(Self::from(numeral))
    }

    /// Build from raw stat mode bits. File-type and special bits are ignored.
    #[inline]
    pub const fn from_mode(mode: u32) -> Self {
        Self {
            levels: [
                ((mode >> 6) & 0o7) as u8,
                ((mode >> 3) & 0o7) as u8,
                (mode & 0o7) as u8,
            ],
        }
    }

    /// The 9 permission bits as a mode value (e.g. `0o644`).
    #[inline]
    pub const fn mode(&self) -> u32 {
        let [o, g, p] = self.levels;
        ((o as u32) << 6) | ((g as u32) << 3) | p as u32
    }

    /// Level (0–7) held by `role`.
    #[inline]
    pub const fn level(&self, role: Role) -> u8 {
        self.levels[role.index()]
    }

    /// Symbolic block held by `role`.
    #[inline]
    pub const fn block(&self, role: Role) -> &'static str {
        SYMBOLIC_ALPHABET[self.levels[role.index()] as usize]
    }

    /// Zero-padded three-digit numeral, e.g. `"644"` or `"066"`.
    pub fn as_numeric(&self) -> String {
        let [o, g, p] = self.levels;
        format!("{o}{g}{p}")
    }

    /// Nine-character symbolic form, e.g. `"rw-r--r--"`.
    pub fn as_symbolic(&self) -> String {
        Role::ALL.iter().map(|&role| self.block(role)).collect()
    }

    /// Whether `role` holds `capability`.
    pub fn can(&self, role: Role, capability: Capability) -> bool {
        self.block(role).as_bytes()[capability.position()] == capability.letter()
    }

    /// Grant `capability` to `role`.
    pub fn set(&mut self, role: Role, capability: Capability) -> &mut Self {
        self.write_block(role, capability, capability.letter())
    }

    /// Revoke `capability` from `role`.
    pub fn unset(&mut self, role: Role, capability: Capability) -> &mut Self {
        self.write_block(role, capability, b'-')
    }

    /// [`can`](Self::can) with role and capability given by name.
    ///
    /// # Errors
    ///
    /// [`PermError::InvalidArgument`] for an unknown role or capability.
    pub fn can_named(&self, role: &str, capability: &str) -> Result<bool, PermError> {
        Ok(self.can(role.parse()?, capability.parse()?))
    }

    /// [`set`](Self::set) with role and capability given by name.
    ///
    /// # Errors
    ///
    /// [`PermError::InvalidArgument`] for an unknown role or capability.
    pub fn set_named(&mut self, role: &str, capability: &str) -> Result<&mut Self, PermError> {
        Ok(self.set(role.parse()?, capability.parse()?))
    }

    /// [`unset`](Self::unset) with role and capability given by name.
    ///
    /// # Errors
    ///
    /// [`PermError::InvalidArgument`] for an unknown role or capability.
    pub fn unset_named(&mut self, role: &str, capability: &str) -> Result<&mut Self, PermError> {
        Ok(self.unset(role.parse()?, capability.parse()?))
    }

    // The block position is the bit, letter-or-dash is its value, and the
    // alphabet maps the edited block back to a level.
    fn write_block(&mut self, role: Role, capability: Capability, value: u8) -> &mut Self {
        let src = self.block(role).as_bytes();
        let mut block = [src[0], src[1], src[2]];
        block[capability.position()] = value;
        // Every letter-or-dash block is in the alphabet.
        if let Some(level) = level_of_block(&block) {
            self.levels[role.index()] = level;
        }
        self
    }
}

impl From<NumericPermission> for PermissionSet {
    fn from(numeral: NumericPermission) -> Self {
        Self {
            levels: numeral.digits(),
        }
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for role in Role::ALL {
            f.write_str(self.block(role))?;
        }
        Ok(())
    }
}

impl FromStr for PermissionSet {
    type Err = PermError;

    /// Accepts either encoding: 9 or 10 characters is symbolic, anything
    /// else is read as a numeral.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.chars().count() {
            9 | 10 => Self::from_symbolic(s),
            _ => Self::from_numeric(s),
        }
    }
}

/// Serializes as the three-digit numeral; deserializes from either encoding.
#[cfg(feature = "serde")]
impl serde::Serialize for PermissionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_numeric())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PermissionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_to_symbolic() {
        assert_eq!(PermissionSet::from_numeric(666).unwrap().as_symbolic(), "rw-rw-rw-");
        assert_eq!(PermissionSet::from_numeric("751").unwrap().as_symbolic(), "rwxr-x--x");
        assert_eq!(PermissionSet::from_numeric("000").unwrap().as_symbolic(), "---------");
    }

    #[test]
    fn level_per_role() {
        let p = PermissionSet::from_numeric("751").unwrap();
        assert_eq!(p.level(Role::Owner), 7);
        assert_eq!(p.level(Role::Group), 5);
        assert_eq!(p.level(Role::Public), 1);
        assert_eq!(p.block(Role::Group), SYMBOLIC_ALPHABET[usize::from(p.level(Role::Group))]);
    }

    #[test]
    fn symbolic_to_numeric() {
        assert_eq!(PermissionSet::from_symbolic("rw-rw-rw-").unwrap().as_numeric(), "666");
        assert_eq!(PermissionSet::from_symbolic("rwxr-xr-x").unwrap().as_numeric(), "755");
    }

    #[test]
    fn symbolic_with_type_marker() {
        let p = PermissionSet::from_symbolic("drwxr-x---").unwrap();
        assert_eq!(p.as_numeric(), "750");
        let p = PermissionSet::from_symbolic("-rw-r--r--").unwrap();
        assert_eq!(p.as_numeric(), "644");
    }

    #[test]
    fn numeric_keeps_leading_zeros() {
        let p = PermissionSet::from_numeric("066").unwrap();
        assert_eq!(p.as_numeric(), "066");
        assert_eq!(p.as_symbolic(), "---rw-rw-");
    }

    #[test]
    fn short_numeric_is_padded() {
        assert_eq!(PermissionSet::from_numeric(6).unwrap().as_numeric(), "006");
        assert_eq!(PermissionSet::from_numeric(0).unwrap().as_numeric(), "000");
    }

    #[test]
    fn four_digit_numeric_drops_special() {
        let a = PermissionSet::from_numeric(4666).unwrap();
        let b = PermissionSet::from_numeric(666).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unset_then_set() {
        let mut p = PermissionSet::from_numeric(666).unwrap();
        assert_eq!(p.unset(Role::Group, Capability::Read).as_numeric(), "626");

        let mut p = PermissionSet::from_numeric(646).unwrap();
        assert_eq!(p.set(Role::Group, Capability::Write).as_symbolic(), "rw-rw-rw-");
    }

    #[test]
    fn chained_mutation() {
        let mut p = PermissionSet::from_numeric("000").unwrap();
        p.set(Role::Owner, Capability::Read)
            .set(Role::Owner, Capability::Write)
            .set(Role::Public, Capability::Execute);
        assert_eq!(p.as_numeric(), "601");
    }

    #[test]
    fn set_unset_are_idempotent() {
        let mut p = PermissionSet::from_numeric(0).unwrap();
        for role in Role::ALL {
            for cap in Capability::ALL {
                p.set(role, cap).set(role, cap);
                assert!(p.can(role, cap));
                p.unset(role, cap).unset(role, cap);
                assert!(!p.can(role, cap));
            }
        }
        assert_eq!(p.as_numeric(), "000");
    }

    #[test]
    fn mutation_touches_only_target_role() {
        let mut p = PermissionSet::from_numeric(754).unwrap();
        p.unset(Role::Group, Capability::Execute);
        assert_eq!(p.as_numeric(), "744");
        p.set(Role::Public, Capability::Write);
        assert_eq!(p.as_numeric(), "746");
    }

    #[test]
    fn can_reads_letters() {
        let p = PermissionSet::from_symbolic("rw-r---wx").unwrap();
        assert!(p.can(Role::Owner, Capability::Read));
        assert!(p.can(Role::Owner, Capability::Write));
        assert!(!p.can(Role::Owner, Capability::Execute));
        assert!(p.can(Role::Group, Capability::Read));
        assert!(!p.can(Role::Group, Capability::Write));
        assert!(!p.can(Role::Public, Capability::Read));
        assert!(p.can(Role::Public, Capability::Execute));
    }

    #[test]
    fn named_arguments() {
        let mut p = PermissionSet::from_symbolic("rw-rw-rw-").unwrap();
        assert!(p.can_named("group", "read").unwrap());
        assert!(!p.can_named("public", "execute").unwrap());

        let err = p.can_named("admin", "read").unwrap_err();
        assert!(matches!(err, PermError::InvalidArgument { argument: "role", .. }));
        let err = p.set_named("owner", "fly").unwrap_err();
        assert!(matches!(
            err,
            PermError::InvalidArgument {
                argument: "capability",
                ..
            }
        ));

        let numeric = p.unset_named("group", "read").unwrap().as_numeric();
        assert_eq!(numeric, "626");
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            PermissionSet::from_numeric(999),
            Err(PermError::InvalidFormat { .. })
        ));
        assert!(matches!(
            PermissionSet::from_symbolic("xyz"),
            Err(PermError::InvalidFormat { .. })
        ));
        assert!(matches!(
            PermissionSet::from_symbolic("rw-rw-rwz"),
            Err(PermError::InvalidFormat { .. })
        ));
        assert!(matches!(
            PermissionSet::from_symbolic("wr-rw-rw-"),
            Err(PermError::InvalidFormat { .. })
        ));
        assert!(PermissionSet::from_symbolic("rw-rw-rw-rw").is_err());
    }

    #[test]
    fn every_numeral_round_trips() {
        for o in 0..8 {
            for g in 0..8 {
                for p in 0..8 {
                    let numeral = format!("{o}{g}{p}");
                    let symbolic = PermissionSet::from_numeric(&numeral).unwrap().as_symbolic();
                    let back = PermissionSet::from_symbolic(&symbolic).unwrap().as_numeric();
                    assert_eq!(back, numeral);
                }
            }
        }
    }

    #[test]
    fn mode_conversion() {
        let p = PermissionSet::from_mode(0o100644);
        assert_eq!(p.as_numeric(), "644");
        assert_eq!(p.mode(), 0o644);
        assert_eq!(PermissionSet::from_mode(0o4755).as_symbolic(), "rwxr-xr-x");
    }

    #[test]
    fn parse_either_encoding() {
        assert_eq!("rw-r--r--".parse::<PermissionSet>().unwrap().as_numeric(), "644");
        assert_eq!("644".parse::<PermissionSet>().unwrap().as_symbolic(), "rw-r--r--");
        assert_eq!(
            PermissionSet::from_numeric(640).unwrap().to_string(),
            "rw-r-----"
        );
    }
}
