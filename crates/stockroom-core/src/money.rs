//! # Money Module
//!
//! Provides the `Money` type used for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "9.99" is parsed straight into 999 cents                            │
//! │    A third decimal ("9.999") is rejected, never rounded                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::money::Money;
//!
//! let price: Money = "10.99".parse().unwrap();
//! assert_eq!(price.cents(), 1099);
//! assert_eq!(price.to_string(), "10.99");
//! ```
//!
//! ## Wire Format
//! Money serializes as a decimal string (`"10.99"`) so no JSON client ever
//! round-trips it through a float.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents, with exactly two decimal places of precision.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values can be parsed so validation can
///   report them, instead of failing deep inside the parser
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Stored as INTEGER**: the database column holds cents directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use stockroom_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Reasons a decimal string cannot become [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("value is empty")]
    Empty,

    #[error("'{0}' is not a decimal number")]
    InvalidFormat(String),

    #[error("'{0}' has more than 2 decimal places")]
    TooManyDecimals(String),

    #[error("'{0}' is too large")]
    Overflow(String),
}

/// Parses `"12"`, `"12.5"`, `"12.50"`, `"-3.10"` or `".75"`.
///
/// Trailing zeros past the second decimal are accepted (`"1.500"`), any
/// other third decimal is rejected rather than rounded.
impl FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let value =
            Decimal::from_str(s).map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
        Money::try_from_decimal(value).map_err(|e| match e {
            MoneyParseError::TooManyDecimals(_) => MoneyParseError::TooManyDecimals(s.to_string()),
            _ => MoneyParseError::Overflow(s.to_string()),
        })
    }
}

impl Money {
    /// Converts an exact decimal into cents.
    ///
    /// Fails when the value has a nonzero digit past the second decimal or
    /// does not fit in `i64` cents.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal_macros::dec;
    /// use stockroom_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_decimal(dec!(10.99)).unwrap().cents(), 1099);
    /// assert!(Money::try_from_decimal(dec!(0.001)).is_err());
    /// ```
    pub fn try_from_decimal(value: Decimal) -> Result<Self, MoneyParseError> {
        if value.normalize().scale() > 2 {
            return Err(MoneyParseError::TooManyDecimals(value.to_string()));
        }

        value
            .checked_mul(dec!(100))
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or_else(|| MoneyParseError::Overflow(value.to_string()))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two places: `10.99`, `-5.50`, `0.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let text = format!("{}{}.{:02}", sign, self.major().abs(), self.minor());
        f.pad(&text)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
