//! License-plate input: four decimal digits split into two kernel pairs.

use emplaka_kernel::carrier::value_key::ValueKey;

/// Number of digits on a plate.
pub const PLATE_LEN: usize = 4;

/// A validated plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plate {
    pub digits: [u8; PLATE_LEN],
}

/// Why a plate string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlateError {
    /// Not exactly four characters.
    WrongLength { found: usize },
    /// A character other than `0`-`9`.
    NonDigit { position: usize, found: char },
}

impl std::fmt::Display for PlateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongLength { found } => {
                write!(f, "plate must have {PLATE_LEN} characters, got {found}")
            }
            Self::NonDigit { position, found } => {
                write!(f, "plate character {position} is not a digit: {found:?}")
            }
        }
    }
}

impl std::error::Error for PlateError {}

impl Plate {
    /// Parse exactly four ASCII digits. No trimming.
    ///
    /// # Errors
    ///
    /// Returns [`PlateError`] for a wrong length or a non-digit character.
    pub fn parse(input: &str) -> Result<Self, PlateError> {
        let chars: Vec<char> = input.chars().collect();
        if chars.len() != PLATE_LEN {
            return Err(PlateError::WrongLength { found: chars.len() });
        }
        let mut digits = [0u8; PLATE_LEN];
        for (position, (&c, slot)) in chars.iter().zip(digits.iter_mut()).enumerate() {
            let value = c
                .to_digit(10)
                .ok_or(PlateError::NonDigit { position, found: c })?;
            *slot = u8::try_from(value).unwrap_or_default();
        }
        Ok(Self { digits })
    }

    /// `(digit0, digit1)`.
    #[must_use]
    pub fn left(&self) -> ValueKey {
        ValueKey::Pair(i64::from(self.digits[0]), i64::from(self.digits[1]))
    }

    /// `(digit2, digit3)`.
    #[must_use]
    pub fn right(&self) -> ValueKey {
        ValueKey::Pair(i64::from(self.digits[2]), i64::from(self.digits[3]))
    }
}

impl std::fmt::Display for Plate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}
