//! # Money Module
//!
//! Provides the `Money` type for prices and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A product priced 0.10 added three times:                               │
//! │                                                                         │
//! │    floats:  0.1 + 0.1 + 0.1 = 0.30000000000000004                       │
//! │    cents:   10 + 10 + 10    = 30                                        │
//! │                                                                         │
//! │  Prices are stored and summed as cents; only display divides by 100.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopsphere_core::money::Money;
//!
//! let price = Money::from_cents(1999); // $19.99
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 5997);
//! assert_eq!(line.to_string(), "$59.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

/// A monetary value in cents.
///
/// Signed so that a difference of two amounts is representable; product
/// prices themselves are validated to be non-negative.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from dollars and cents.
    ///
    /// ```rust
    /// use shopsphere_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(24, 5).cents(), 2405);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal amount such as `"19.99"`, `"5"` or `"$0.50"`.
    ///
    /// At most two fractional digits are accepted. Returns `None` for
    /// anything else, including negative amounts.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim().trim_start_matches('$');
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };

        if major.is_empty() && minor.is_empty() {
            return None;
        }
        if minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !major.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let major: i64 = if major.is_empty() { 0 } else { major.parse().ok()? };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().ok()? * 10,
            _ => minor.parse().ok()?,
        };

        major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .map(Money)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Price of `qty` units, or `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Price of `qty` units. Saturates instead of wrapping; validated prices
    /// never get near the limit.
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }

    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// Debug-friendly `$12.34` rendering. The shell formats with its configured
/// currency symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_parse_accepts_common_forms() {
        assert_eq!(Money::parse("19.99"), Some(Money::from_cents(1999)));
        assert_eq!(Money::parse("5"), Some(Money::from_cents(500)));
        assert_eq!(Money::parse("$0.5"), Some(Money::from_cents(50)));
        assert_eq!(Money::parse(".25"), Some(Money::from_cents(25)));
        assert_eq!(Money::parse(" 3.10 "), Some(Money::from_cents(310)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("."), None);
        assert_eq!(Money::parse("-4.00"), None);
        assert_eq!(Money::parse("1.999"), None);
        assert_eq!(Money::parse("ten"), None);
    }

    #[test]
    fn test_sum_and_quantity() {
        let total: Money = [Money::from_cents(10), Money::from_cents(10), Money::from_cents(10)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 30);
        assert_eq!(Money::from_cents(299).multiply_quantity(3).cents(), 897);
        assert_eq!((Money::from_cents(500) - Money::from_cents(150)).cents(), 350);
    }

    #[test]
    fn test_arithmetic_does_not_overflow() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(huge.checked_multiply_quantity(2), None);
        assert_eq!(huge.multiply_quantity(2).cents(), i64::MAX);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!((huge + huge).cents(), i64::MAX);

        let total: Money = [huge, huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert_eq!(
            Money::from_cents(299).checked_multiply_quantity(3),
            Some(Money::from_cents(897))
        );
    }
}
