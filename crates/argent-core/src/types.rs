//! # Domain Types
//!
//! Core domain types for the dual-balance ledger.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐  ┌───────────────┐  ┌─────────────────────┐     │
//! │  │   Customer    │  │     Sale      │  │    LedgerEntry      │     │
//! │  │ ───────────── │  │ ───────────── │  │ ─────────────────── │     │
//! │  │ balance_weight│  │ voucher_number│  │ weight_delta        │     │
//! │  │ balance_cash  │  │ totals        │  │ cash_delta          │     │
//! │  │               │  │ snapshots     │  │ balances before/    │     │
//! │  │               │  │ paid counters │  │ after, both units   │     │
//! │  └───────────────┘  └───────────────┘  └─────────────────────┘     │
//! │                                                                     │
//! │  Channel ─ PaymentStatus ─ SilverReturnStatus ─ PaymentEvent        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every customer carries two independent running balances: fine silver in
//! grams (`balance_weight`) and labor/cash charges in rupees (`balance_cash`).
//! Positive means the customer owes the shop. Sales debit both balances;
//! settlement events credit them; the ledger records every move.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::weight::Weight;

// =============================================================================
// Percent
// =============================================================================

/// A percentage in basis points (bps).
///
/// 1 basis point = 0.01%. Touch of 92.5% is 9250 bps; a 1.5% GST component
/// is 150 bps. Integer bps keep the formula engine free of floats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Percent(u32);

impl Percent {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a percentage from a whole-number percent value.
    ///
    /// ## Example
    /// ```rust
    /// use argent_core::types::Percent;
    ///
    /// assert_eq!(Percent::from_percent(92).bps(), 9_200);
    /// ```
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        Percent(pct * 100)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum of two rates (touch + wastage in the silver formula).
    #[inline]
    pub const fn plus(self, other: Percent) -> Percent {
        Percent(self.0 + other.0)
    }
}

// =============================================================================
// Channel
// =============================================================================

/// A billing channel.
///
/// The four channels share one ledger engine and diverge only in the
/// [`ChannelPolicy`](crate::policy::ChannelPolicy) each one selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Walk-in trade; labor charged on net weight, no GST, no amount column.
    Regular,
    /// Bulk trade; silver must be physically returned, GST optional.
    Wholesale,
    /// Catalogue product billing.
    Product,
    /// GST-invoiced billing.
    Gst,
}

impl Channel {
    /// Stable lowercase name, as stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Channel::Regular => "regular",
            Channel::Wholesale => "wholesale",
            Channel::Product => "product",
            Channel::Gst => "gst",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// The derived payment status of a sale.
///
/// Never stored authority: always re-derivable from the sale's remaining
/// balances plus whether any payment was ever recorded. See
/// [`crate::status::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment has ever been recorded against the sale.
    Pending,
    /// At least one payment recorded, but a balance remains above tolerance.
    Partial,
    /// Both balances at or below the settlement tolerances.
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

// =============================================================================
// Silver Return Status
// =============================================================================

/// Progress of the physical-silver return obligation on a wholesale sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum SilverReturnStatus {
    /// Channel does not track silver returns.
    NotApplicable,
    /// Nothing returned yet.
    Pending,
    /// Some silver returned, obligation remains.
    Partial,
    /// Full obligation returned.
    Completed,
}

impl Default for SilverReturnStatus {
    fn default() -> Self {
        SilverReturnStatus::NotApplicable
    }
}

// =============================================================================
// Ledger Entry Type
// =============================================================================

/// The kind of event a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Sale creation; debits both balances.
    Sale,
    /// Cash received against the labor balance.
    CashPayment,
    /// Physical fine silver received against the weight balance.
    SilverPayment,
    /// Cash received in lieu of silver at an agreed rate.
    CashForSilver,
    /// Physical silver returned against a wholesale obligation.
    SilverReturn,
    /// Manual balance adjustment outside any sale.
    Adjustment,
}

// =============================================================================
// Customer
// =============================================================================

/// A trading customer and their two running balances.
///
/// Balances are mutated only by the settlement and payment processors.
/// A customer with sales on file is never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Fine silver owed by the customer (negative: owed to the customer).
    pub balance_weight: Weight,
    /// Labor/cash charges owed by the customer.
    pub balance_cash: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale voucher with its totals, balance snapshots and paid counters.
///
/// ## Snapshot Pattern
/// `previous_balance_*` and `closing_balance_*` freeze the customer's
/// balances around the creation-time ledger entries. Later payments move the
/// customer's current balances and this sale's own `paid_*`/`balance_*`
/// counters; they never touch the snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    /// Unique, day-scoped, channel-scoped voucher, e.g. `REG202608070001`.
    pub voucher_number: String,
    pub customer_id: i64,
    pub channel: Channel,
    pub sale_date: NaiveDate,
    /// Silver rate per gram used for item amounts (zero on labor-only channels).
    pub silver_rate: Money,
    pub total_net_weight: Weight,
    /// Sum of per-line wastage rates, kept for voucher display parity.
    pub total_wastage: Percent,
    pub total_silver_weight: Weight,
    pub total_labor_charges: Money,
    pub subtotal: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub total_amount: Money,
    /// Customer balances immediately before this sale.
    pub previous_balance_weight: Weight,
    pub previous_balance_cash: Money,
    /// Customer balances immediately after all creation-time entries.
    pub closing_balance_weight: Weight,
    pub closing_balance_cash: Money,
    /// Cumulative silver credited (payments + cash-for-silver).
    pub paid_weight: Weight,
    /// Cumulative cash credited against the labor balance.
    pub paid_cash: Money,
    /// This sale's remaining silver obligation.
    pub balance_weight: Weight,
    /// This sale's remaining cash obligation.
    pub balance_cash: Money,
    /// Wholesale: silver the customer must physically return.
    pub silver_to_return: Weight,
    pub silver_returned: Weight,
    pub silver_return_status: SilverReturnStatus,
    pub status: PaymentStatus,
    pub notes: Option<String>,
    /// Actor id from the external auth layer.
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item on a sale, with all derived fields frozen at sale time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    /// Inventory product this line decremented, if any.
    pub product_id: Option<i64>,
    pub description: String,
    /// Hallmark stamp, `-` when absent on the physical piece.
    pub stamp: Option<String>,
    pub pieces: i64,
    pub gross_weight: Weight,
    pub stone_weight: Weight,
    pub net_weight: Weight,
    pub wastage: Percent,
    pub touch: Percent,
    /// Derived: `(touch + wastage) * net / 100`.
    pub silver_weight: Weight,
    pub labor_rate_per_kg: Money,
    pub labor_charges: Money,
    /// Derived: `silver_weight * silver_rate + labor_charges`
    /// (labor alone on labor-only channels).
    pub item_amount: Money,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// One immutable audit row.
///
/// The sum of all `weight_delta` (resp. `cash_delta`) for a customer since
/// inception equals their current balance. Entries are removed only when
/// their owning sale is deleted wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LedgerEntry {
    /// UUID v4, assigned at insert.
    pub id: String,
    pub customer_id: i64,
    pub sale_id: Option<i64>,
    pub entry_type: EntryType,
    /// Signed impact on the weight balance (+ debit, - credit).
    pub weight_delta: Weight,
    /// Signed impact on the cash balance (+ debit, - credit).
    pub cash_delta: Money,
    /// Cash that changed hands, recorded even when `cash_delta` is zero
    /// (cash-for-silver on channels that do not offset the cash balance).
    pub cash_amount: Money,
    /// Rate per gram for cash-for-silver entries, zero otherwise.
    pub silver_rate: Money,
    pub balance_weight_before: Weight,
    pub balance_weight_after: Weight,
    pub balance_cash_before: Money,
    pub balance_cash_after: Money,
    pub notes: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Payment Event
// =============================================================================

/// A settlement event against a sale.
///
/// Replaces the ad hoc nested payment payloads of the billing endpoints with
/// one tagged union; the payment processor dispatches on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentEvent {
    /// Cash against the labor balance.
    Cash { amount: Money },
    /// Physical fine silver against the weight balance.
    Silver { weight: Weight },
    /// Cash paid in lieu of silver at an agreed rate per gram.
    CashForSilver { weight: Weight, rate: Money },
    /// Physical silver returned against a wholesale obligation.
    SilverReturn { weight: Weight },
}

impl PaymentEvent {
    /// The ledger entry type this event produces.
    pub const fn entry_type(&self) -> EntryType {
        match self {
            PaymentEvent::Cash { .. } => EntryType::CashPayment,
            PaymentEvent::Silver { .. } => EntryType::SilverPayment,
            PaymentEvent::CashForSilver { .. } => EntryType::CashForSilver,
            PaymentEvent::SilverReturn { .. } => EntryType::SilverReturn,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
