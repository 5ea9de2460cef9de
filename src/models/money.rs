//! Milliunit amounts
//!
//! YNAB encodes every currency amount as an integer number of milliunits
//! (1 major unit = 1000 milliunits). Amounts entered by the user are parsed
//! straight into milliunits without going through floating point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use thiserror::Error;

/// Milliunits per major currency unit
pub const MILLIUNITS_PER_UNIT: i64 = 1000;

/// Largest accepted magnitude for an entered balance, in major units
pub const MAX_MAJOR_UNITS: i64 = 1_000_000_000_000;

/// Number of decimal digits carried by a milliunit amount
const MILLI_DIGITS: usize = 3;

/// A signed currency amount in milliunits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliunits(i64);

impl Milliunits {
    /// Create an amount from a raw milliunit value
    ///
    /// # Examples
    /// ```
    /// use ynab_updater::models::Milliunits;
    /// let amount = Milliunits::new(25_500); // 25.50
    /// assert_eq!(amount.to_major_string(), "25.50");
    /// ```
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the raw milliunit value
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Subtraction that yields `None` instead of overflowing
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Parse a decimal string in major units into milliunits
    ///
    /// Accepts an optional leading `+` or `-`, digits and at most one `.`
    /// followed by digits (`"150"`, `"-20.5"`, `".5"`, `"50."`). Surrounding
    /// whitespace is ignored. Fractional digits beyond the third are rounded
    /// to the nearest milliunit, half away from zero.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let malformed = || AmountError::Malformed(trimmed.to_string());

        let (negative, body) = if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('+') {
            (false, rest)
        } else {
            (false, trimmed)
        };

        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(malformed());
        }
        if whole.is_empty() && fraction.is_empty() {
            return Err(malformed());
        }

        let out_of_range = || AmountError::OutOfRange(trimmed.to_string());

        let whole_digits = whole.trim_start_matches('0');
        // i64 holds 18 digits comfortably; anything longer is far past the limit
        if whole_digits.len() > 15 {
            return Err(out_of_range());
        }
        let whole_value: i64 = if whole_digits.is_empty() {
            0
        } else {
            whole_digits.parse().map_err(|_| malformed())?
        };
        if whole_value > MAX_MAJOR_UNITS {
            return Err(out_of_range());
        }

        let (kept, excess) = if fraction.len() > MILLI_DIGITS {
            fraction.split_at(MILLI_DIGITS)
        } else {
            (fraction, "")
        };
        let mut fraction_value: i64 = 0;
        for digit in kept.bytes() {
            fraction_value = fraction_value * 10 + i64::from(digit - b'0');
        }
        for _ in kept.len()..MILLI_DIGITS {
            fraction_value *= 10;
        }
        let round_up = excess.bytes().next().is_some_and(|d| d >= b'5');

        let magnitude =
            whole_value * MILLIUNITS_PER_UNIT + fraction_value + i64::from(round_up);
        if magnitude > MAX_MAJOR_UNITS * MILLIUNITS_PER_UNIT {
            return Err(out_of_range());
        }

        Ok(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Format as a major-unit decimal string with exactly two fractional digits
    ///
    /// Milliunits are rounded to the nearest cent, half away from zero.
    /// A value that rounds to zero is printed without a sign.
    pub fn to_major_string(&self) -> String {
        let cents = self.rounded_cents();
        let sign = if self.0 < 0 && cents != 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    }

    /// Absolute value rounded to whole cents
    pub(crate) fn rounded_cents(&self) -> u64 {
        (self.0.unsigned_abs() + 5) / 10
    }
}

impl Default for Milliunits {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Milliunits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_major_string())
    }
}

impl Add for Milliunits {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Milliunits {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Milliunits {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Milliunits {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Milliunits {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Milliunits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Milliunits::zero(), |acc, m| acc + m)
    }
}

/// Why an entered amount was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("no amount entered")]
    Empty,

    #[error("'{0}' is not a number")]
    Malformed(String),

    #[error("'{0}' is outside the supported range")]
    OutOfRange(String),
}
