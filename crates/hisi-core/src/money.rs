//! # Money Module
//!
//! Display-side money handling for catalog prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The backend sends prices as JSON numbers:  "price": 4599.99           │
//! │                                                                         │
//! │  Comparing or subtracting those as f64 drifts:                         │
//! │    5000.00 - 4599.99 = 400.0100000000002                               │
//! │                                                                         │
//! │  OUR SOLUTION: convert once at the edge to integer minor units         │
//! │    459999 cents, then every comparison and difference is exact         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hisi_core::money::Money;
//!
//! let price = Money::from_decimal(4599.99);
//! assert_eq!(price.cents(), 459999);
//! assert_eq!(price.format("KES"), "KES 4,599.99");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// The currency code travels alongside on the product, not inside the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a backend decimal amount, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use hisi_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(19.99).cents(), 1999);
    /// assert_eq!(Money::from_decimal(-5.5).cents(), -550);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money((amount * 100.0).round() as i64)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole units (shillings, dollars), truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Minor units (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Percentage off relative to `original`, rounded to the nearest whole
    /// percent. `None` unless `original` is strictly greater than `self`.
    ///
    /// ## Example
    /// ```rust
    /// use hisi_core::money::Money;
    ///
    /// let price = Money::from_cents(7500);
    /// assert_eq!(price.discount_from(Money::from_cents(10000)), Some(25));
    /// assert_eq!(price.discount_from(Money::from_cents(7500)), None);
    /// ```
    pub fn discount_from(&self, original: Money) -> Option<u32> {
        if original.0 <= self.0 || original.0 <= 0 {
            return None;
        }
        let off = (original.0 - self.0) as i128 * 100;
        let pct = (off + original.0 as i128 / 2) / original.0 as i128;
        Some(pct as u32)
    }

    /// Formats as `"<CODE> 1,234.50"`.
    pub fn format(&self, currency: &str) -> String {
        format!("{} {}", currency, self)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain amount with thousands separators, no currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        let digits = (cents / 100).to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        write!(f, "{}{}.{:02}", sign, grouped, cents % 100)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Difference between two prices (savings).
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
