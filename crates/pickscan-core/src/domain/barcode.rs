//! Barcode value type and format validation.
//!
//! Retail barcodes in scope are the numeric GTIN family: EAN-8 (8 digits) up
//! to EAN-13/GTIN-13 (13 digits), with UPC-A (12) and zero-suppressed UPC-E
//! (8) in between. The format rule is therefore "8 to 13 ASCII decimal digits
//! after trimming". Symbology check digits are the decode engine's concern
//! and are not re-verified here.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Fewest digits accepted (EAN-8 / UPC-E).
pub const MIN_DIGITS: usize = 8;

/// Most digits accepted (EAN-13 / GTIN-13).
pub const MAX_DIGITS: usize = 13;

/// Why a candidate string failed barcode validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarcodeError {
    /// The candidate is empty after trimming.
    #[error("barcode is empty")]
    Empty,

    /// The candidate contains a character other than `0`-`9`.
    #[error("barcode must contain only digits 0-9")]
    NonDigit,

    /// The candidate has the wrong number of digits.
    #[error("barcode must be 8-13 digits, got {0}")]
    WrongLength(usize),
}

/// A validated retail barcode.
///
/// Construction goes through [`Barcode::parse`], so a value of this type
/// always satisfies the format rule and downstream code never re-checks it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Barcode(String);

impl Barcode {
    /// Parses a candidate string into a [`Barcode`].
    ///
    /// Leading and trailing whitespace is trimmed; the remainder must be
    /// 8-13 ASCII decimal digits (no sign, no separators).
    ///
    /// # Errors
    ///
    /// Returns the [`BarcodeError`] for the first rule the candidate broke.
    pub fn parse(candidate: &str) -> Result<Barcode, BarcodeError> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            return Err(BarcodeError::Empty);
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BarcodeError::NonDigit);
        }
        let len = trimmed.len();
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&len) {
            return Err(BarcodeError::WrongLength(len));
        }
        Ok(Barcode(trimmed.to_owned()))
    }

    /// Returns `true` iff `candidate` would parse as a barcode.
    ///
    /// Total over all strings: malformed input yields `false`, never a panic
    /// or an error.
    pub fn is_well_formed(candidate: &str) -> bool {
        Barcode::parse(candidate).is_ok()
    }

    /// The digits as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Barcode {
    type Err = BarcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Barcode::parse(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
