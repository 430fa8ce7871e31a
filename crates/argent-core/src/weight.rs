//! # Weight Module
//!
//! The `Weight` type: fine-silver weight in milligrams.
//!
//! Weights follow the same integer discipline as [`Money`](crate::money::Money).
//! The trade works to three decimal places of a gram, so one milligram is the
//! smallest unit that can appear on a voucher. 94.000 g is stored as 94_000.
//!
//! The settlement tolerance for a weight balance is 5 mg (0.005 g); see
//! [`crate::status`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A silver weight in milligrams.
///
/// Signed: a negative weight balance means the shop owes the customer silver.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Weight(i64);

impl Weight {
    /// Creates a Weight from milligrams.
    #[inline]
    pub const fn from_milligrams(mg: i64) -> Self {
        Weight(mg)
    }

    /// Creates a Weight from whole grams.
    ///
    /// ## Example
    /// ```rust
    /// use argent_core::weight::Weight;
    ///
    /// let net = Weight::from_grams(100);
    /// assert_eq!(net.milligrams(), 100_000);
    /// ```
    #[inline]
    pub const fn from_grams(grams: i64) -> Self {
        Weight(grams * 1_000)
    }

    /// Returns the value in milligrams.
    #[inline]
    pub const fn milligrams(&self) -> i64 {
        self.0
    }

    /// Returns the whole-gram portion.
    #[inline]
    pub const fn grams(&self) -> i64 {
        self.0 / 1_000
    }

    /// Returns the milligram portion (always 0-999).
    #[inline]
    pub const fn milligrams_part(&self) -> i64 {
        (self.0 % 1_000).abs()
    }

    /// Zero weight.
    #[inline]
    pub const fn zero() -> Self {
        Weight(0)
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
        Weight(self.0.abs())
    }
}

/// Display shows grams to three decimals, e.g. `94.000g`.
impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:03}g",
            sign,
            self.grams().abs(),
            self.milligrams_part()
        )
    }
}

impl Add for Weight {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Weight(self.0 + other.0)
    }
}

impl AddAssign for Weight {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Weight {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Weight(self.0 - other.0)
    }
}

impl SubAssign for Weight {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Weight {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Weight(-self.0)
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Self {
        iter.fold(Weight::zero(), Add::add)
    }
}
