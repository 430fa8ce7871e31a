//! # Status Resolver
//!
//! Derives a sale's payment status from its two remaining balances.
//!
//! A balance never lands on exact zero: silver is weighed to the milligram
//! and payments carry rounding drift, so "settled" means at or below a small
//! tolerance. 0.005 g of silver or one rupee of labor is noise, not debt.
//!
//! The resolver is a pure function of `(weight, cash, any_payment)`. It
//! never reads, and never depends on, previously stored status flags, so
//! the same balances always resolve to the same status no matter which
//! sequence of events produced them.

use crate::money::Money;
use crate::types::{PaymentStatus, SilverReturnStatus};
use crate::weight::Weight;

/// A weight balance at or below 5 mg counts as settled.
pub const WEIGHT_TOLERANCE: Weight = Weight::from_milligrams(5);

/// A cash balance at or below one rupee counts as settled.
pub const CASH_TOLERANCE: Money = Money::from_paise(100);

/// Whether a remaining weight balance is within settlement tolerance.
#[inline]
pub fn weight_settled(balance: Weight) -> bool {
    balance <= WEIGHT_TOLERANCE
}

/// Whether a remaining cash balance is within settlement tolerance.
#[inline]
pub fn cash_settled(balance: Money) -> bool {
    balance <= CASH_TOLERANCE
}

/// Resolves the payment status of a sale.
///
/// * `Paid` when both balances are settled.
/// * `Partial` when any payment was ever recorded but something remains.
/// * `Pending` when no payment was ever recorded.
pub fn resolve(balance_weight: Weight, balance_cash: Money, any_payment: bool) -> PaymentStatus {
    if weight_settled(balance_weight) && cash_settled(balance_cash) {
        PaymentStatus::Paid
    } else if any_payment {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}

/// Resolves the silver-return progress of a wholesale sale.
pub fn resolve_return(returned: Weight, to_return: Weight) -> SilverReturnStatus {
    if returned >= to_return {
        SilverReturnStatus::Completed
    } else if returned.is_positive() {
        SilverReturnStatus::Partial
    } else {
        SilverReturnStatus::Pending
    }
}
