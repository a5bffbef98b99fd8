//! # Money Module
//!
//! Provides the `Money` type for drink prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Exact cents                                              │
//! │    Prices travel and are stored as "D.CC" strings, and are only        │
//! │    ever interpreted as integer cents. No float is ever involved.       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coffee_core::money::Money;
//!
//! let price = Money::parse("3.50").unwrap();
//! assert_eq!(price.cents(), 350);
//! assert_eq!(price.to_string(), "3.50");
//!
//! assert!(Money::parse("3.5.0").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::MAX_DOLLAR_AMOUNT;

// =============================================================================
// Money Type
// =============================================================================

/// A non-negative monetary value in cents.
///
/// The only way to build one from text is [`Money::parse`], which enforces
/// the `<dollars>.<two digit cents>` shape and the accepted dollar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use coffee_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(4, 25).cents(), 425);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Money(major * 100 + minor)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cent portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Parses and sanity-checks a price string.
    ///
    /// ## Rules
    /// ```text
    ///   "12.50"
    ///    ──┬─ ─┬
    ///      │   └── cents: exactly two digits, 00-99   else MoneyCentParse
    ///      └────── dollars: integer                    else MoneyDollarParse
    ///              within [0, 1000]                    else MoneyAmount
    ///
    ///   anything other than exactly one '.'            → MoneyFormat
    /// ```
    ///
    /// Dollars are checked before cents, so `"-1.xx"` reports `MoneyAmount`.
    pub fn parse(value: &str) -> Result<Money, ValidationError> {
        let mut tokens = value.split('.');
        let (dollar_str, cent_str) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(dollars), Some(cents), None) => (dollars, cents),
            _ => return Err(ValidationError::MoneyFormat),
        };

        let dollars: i64 = dollar_str
            .parse()
            .map_err(|_| ValidationError::MoneyDollarParse)?;

        if !(0..=MAX_DOLLAR_AMOUNT).contains(&dollars) {
            return Err(ValidationError::MoneyAmount);
        }

        if cent_str.len() != 2 || !cent_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::MoneyCentParse);
        }

        let cents: i64 = cent_str
            .parse()
            .map_err(|_| ValidationError::MoneyCentParse)?;

        if !(0..=99).contains(&cents) {
            return Err(ValidationError::MoneyCentParse);
        }

        Ok(Money::from_major_minor(dollars, cents))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the canonical `D.CC` form stored in the database.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.dollars(), self.cents_part())
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
