//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  In floating point:  0.1 + 0.2 = 0.30000000000000004                │
//! │                                                                     │
//! │  A labor balance drifting by fractions of a paisa per sale never    │
//! │  settles against a whole-rupee tolerance.                           │
//! │                                                                     │
//! │  OUR SOLUTION: integer paise (i64).                                 │
//! │  ₹9,475.00 is stored as 947_500. Rounding happens exactly once,     │
//! │  at the point a derived charge is computed.                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use argent_core::money::Money;
//!
//! let labor = Money::from_paise(7_500); // ₹75.00
//! let total = labor + Money::from_rupees(9_400); // ₹9,475.00
//! assert_eq!(total.paise(), 947_500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::types::Percent;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: balances go negative when the shop owes the customer
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **No float constructor**: amounts enter the system already in paise
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use argent_core::money::Money;
    ///
    /// let rate = Money::from_paise(10_000); // ₹100.00 per gram
    /// assert_eq!(rate.paise(), 10_000);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a percentage and returns the resulting amount, rounded
    /// half-up to the paisa.
    ///
    /// Used for the GST components: `subtotal * percent / 100`.
    ///
    /// ## Implementation
    /// Integer math in i128: `(paise * bps + 5000) / 10000`. The +5000
    /// provides rounding (5000/10000 = 0.5). i128 prevents overflow on
    /// large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use argent_core::money::Money;
    /// use argent_core::types::Percent;
    ///
    /// let subtotal = Money::from_rupees(10_000);
    /// let cgst = subtotal.percent_of(Percent::from_bps(150)); // 1.5%
    /// assert_eq!(cgst.paise(), 15_000); // ₹150.00
    /// ```
    pub fn percent_of(&self, rate: Percent) -> Money {
        let paise = (self.0 as i128 * rate.bps() as i128 + 5_000) / 10_000;
        Money(paise as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in a human-readable format, for logs and notes.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
