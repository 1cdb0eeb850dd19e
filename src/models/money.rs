//! Money type for representing currency amounts
//!
//! Household amounts are whole currency units (no fractional unit), stored
//! as i64. Parsing accepts the shapes receipts and extraction replies use:
//! thousands separators and a currency prefix or suffix.
//!
//! Accepted amounts are capped at [`Money::MAX`] and the arithmetic
//! operators saturate, so totals over stored rows never overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A monetary amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Currency markers stripped by [`Money::parse`]
const CURRENCY_MARKERS: &[&str] = &["원", "₩", "$", "KRW", "krw", "won", "WON"];

impl Money {
    /// Largest amount accepted from input
    pub const MAX: Money = Money(1_000_000_000_000_000);

    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use household_ledger::models::Money;
    /// let amount = Money::from_units(12_000);
    /// assert_eq!(amount.to_string(), "12,000");
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in whole units
    pub const fn units(&self) -> i64 {
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
        Self(self.0.saturating_abs())
    }

    /// Whether the amount lies within `-MAX..=MAX`
    pub const fn within_limit(&self) -> bool {
        self.0.unsigned_abs() <= Self::MAX.0 as u64
    }

    /// Convert a JSON-style float that holds a whole amount
    ///
    /// Rejects NaN, infinities, fractions and anything beyond [`Money::MAX`].
    pub fn from_whole_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.fract() != 0.0 || value.abs() > Self::MAX.0 as f64 {
            return None;
        }
        Some(Self(value as i64))
    }

    /// Integer division, discarding the remainder
    pub const fn split(&self, parts: i64) -> Self {
        Self(self.0 / parts)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "12000", "12,000", "12,000원", "₩12,000", "-3,500",
    /// "12000.0". A fractional part must be zero.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let mut s = s.trim();

        let negative = if let Some(stripped) = s.strip_prefix('-') {
            s = stripped.trim_start();
            true
        } else {
            false
        };

        for marker in CURRENCY_MARKERS {
            if let Some(stripped) = s.strip_prefix(marker) {
                s = stripped.trim_start();
            }
            if let Some(stripped) = s.strip_suffix(marker) {
                s = stripped.trim_end();
            }
        }

        let digits: String = s.chars().filter(|c| *c != ',' && *c != ' ').collect();

        let whole = match digits.split_once('.') {
            Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
            Some(_) => return Err(MoneyParseError::Fractional(original.to_string())),
            None => digits.as_str(),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }

        let units: i64 = whole
            .parse()
            .map_err(|_| MoneyParseError::TooLarge(original.to_string()))?;

        let money = Self(if negative { -units } else { units });
        if !money.within_limit() {
            return Err(MoneyParseError::TooLarge(original.to_string()));
        }
        Ok(money)
    }

    /// Format with a currency suffix, e.g. "12,000원"
    pub fn format_with_suffix(&self, suffix: &str) -> String {
        format!("{}{}", self, suffix)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        if self.is_negative() {
            write!(f, "-{}", grouped)
        } else {
            write!(f, "{}", grouped)
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    Fractional(String),
    TooLarge(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::Fractional(s) => {
                write!(f, "Amounts are whole currency units: {}", s)
            }
            MoneyParseError::TooLarge(s) => write!(f, "Amount is too large: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
