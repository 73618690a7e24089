//! Validated numeric permission input.

use std::fmt;
use std::str::FromStr;

use crate::PermError;

/// A numeral such as `644` or `4755`, split into validated digits.
///
/// Input shorter than three digits is padded with leading zeros, so `"6"`
/// reads as `006`. A fourth, leading digit is the special-bits flag
/// (setuid/setgid/sticky); it is kept in [`special`](Self::special) but is
/// not part of the permission triple and is not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericPermission {
    digits: [u8; 3],
    special: Option<u8>,
}

impl NumericPermission {
    /// Parse a numeral string.
    ///
    /// A four-digit numeral loses its leading digit before the remaining
    /// three are checked, so `"8666"` reads as `666`.
    ///
    /// # Errors
    ///
    /// [`PermError::InvalidFormat`] if the input is empty, longer than four
    /// characters, contains a non-digit, or one of the three permission
    /// digits exceeds 7.
    pub fn parse(input: &str) -> Result<Self, PermError> {
        if input.is_empty() {
            return Err(PermError::invalid_format(input, "empty numeral"));
        }
        if input.len() > 4 {
            return Err(PermError::invalid_format(input, "expected 3 or 4 digits"));
        }

        let mut values = input
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| PermError::invalid_format(input, "not a decimal numeral"))?;
        let special = if values.len() == 4 {
            Some(values.remove(0))
        } else {
            None
        };
        while values.len() < 3 {
            values.insert(0, 0);
        }
        if values.iter().any(|&d| d > 7) {
            return Err(PermError::invalid_format(input, "digit exceeds 7"));
        }

        Ok(Self {
            digits: [values[0], values[1], values[2]],
            special,
        })
    }

    /// The owner/group/public digits.
    #[inline]
    pub const fn digits(&self) -> [u8; 3] {
        self.digits
    }

    /// The discarded leading special-bits digit, if one was present.
    #[inline]
    pub const fn special(&self) -> Option<u8> {
        self.special
    }
}

impl FromStr for NumericPermission {
    type Err = PermError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NumericPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(special) = self.special {
            write!(f, "{special}")?;
        }
        let [o, g, p] = self.digits;
        write!(f, "{o}{g}{p}")
    }
}
