//! # Channel Policies
//!
//! One ledger engine, four billing channels. Everything a channel does
//! differently is a knob on [`ChannelPolicy`]; the engine itself has no
//! per-channel branches.
//!
//! ```text
//! ┌────────────┬─────────┬───────────┬─────────┬───────────────────────┐
//! │ knob       │ regular │ wholesale │ product │ gst                   │
//! ├────────────┼─────────┼───────────┼─────────┼───────────────────────┤
//! │ prefix     │ REG     │ (none)    │ PB      │ GST                   │
//! │ labor      │ net     │ gross     │ gross   │ gross                 │
//! │ net weight │ derived │ supplied  │ supplied│ supplied              │
//! │ amount     │ labor   │ item      │ item    │ item                  │
//! │ gst        │ never   │ optional  │ optional│ default 1.5% + 1.5%   │
//! │ c4s cash   │ no      │ no        │ yes     │ no                    │
//! │ return     │ no      │ yes       │ no      │ no                    │
//! └────────────┴─────────┴───────────┴─────────┴───────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Channel, Percent};

// =============================================================================
// Policy Knobs
// =============================================================================

/// Which weight the labor charge is computed from.
///
/// Both variants are live in the trade; they are distinct strategies, not a
/// historical accident to be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaborFormula {
    /// `laborCharges = (grossWeight / 1000) * ratePerKg`
    GrossBased,
    /// `laborCharges = (netWeight * ratePerKg) / 1000`
    NetBased,
}

/// Where a line's net weight comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetWeightSource {
    /// `net = gross - stone`; the caller supplies gross and stone.
    GrossMinusStone,
    /// The caller weighs and supplies net directly.
    Supplied,
}

/// What the sale debits against the cash balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountBasis {
    /// Labor charges only; the silver rate is ignored.
    LaborOnly,
    /// Full item amount: `silver * rate + labor` (plus GST when applied).
    ItemAmount,
}

/// Whether cash-for-silver also credits the cash balance.
///
/// Every channel discharges the silver obligation; they differ on whether
/// the cash received counts against the labor balance or stands apart as a
/// separate cash transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashForSilverPolicy {
    /// Weight balance reduced; cash balance untouched.
    DischargesSilverOnly,
    /// Weight balance reduced and `weight * rate` credited against cash.
    OffsetsCashBalance,
}

/// How GST applies on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GstMode {
    /// GST never applies; requesting it is an error.
    Never,
    /// Applied only when the caller asks for it.
    Optional,
    /// Applied unless the caller overrides the rates.
    OnByDefault,
}

// =============================================================================
// GST Policy
// =============================================================================

/// The two fixed-rate GST components added to a sale subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GstPolicy {
    pub cgst: Percent,
    pub sgst: Percent,
}

impl Default for GstPolicy {
    /// The statutory split for silver articles: 1.5% CGST + 1.5% SGST.
    fn default() -> Self {
        GstPolicy {
            cgst: Percent::from_bps(150),
            sgst: Percent::from_bps(150),
        }
    }
}

// =============================================================================
// Channel Policy
// =============================================================================

/// The full parameterization of one billing channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelPolicy {
    pub channel: Channel,
    /// Voucher prefix, possibly empty (wholesale vouchers are bare dates).
    pub voucher_prefix: &'static str,
    pub labor_formula: LaborFormula,
    pub net_weight_source: NetWeightSource,
    pub amount_basis: AmountBasis,
    pub gst_mode: GstMode,
    pub cash_for_silver: CashForSilverPolicy,
    /// Whether sales carry a physical silver-return obligation.
    pub tracks_silver_return: bool,
}

const REGULAR: ChannelPolicy = ChannelPolicy {
    channel: Channel::Regular,
    voucher_prefix: "REG",
    labor_formula: LaborFormula::NetBased,
    net_weight_source: NetWeightSource::GrossMinusStone,
    amount_basis: AmountBasis::LaborOnly,
    gst_mode: GstMode::Never,
    cash_for_silver: CashForSilverPolicy::DischargesSilverOnly,
    tracks_silver_return: false,
};

const WHOLESALE: ChannelPolicy = ChannelPolicy {
    channel: Channel::Wholesale,
    voucher_prefix: "",
    labor_formula: LaborFormula::GrossBased,
    net_weight_source: NetWeightSource::Supplied,
    amount_basis: AmountBasis::ItemAmount,
    gst_mode: GstMode::Optional,
    cash_for_silver: CashForSilverPolicy::DischargesSilverOnly,
    tracks_silver_return: true,
};

const PRODUCT: ChannelPolicy = ChannelPolicy {
    channel: Channel::Product,
    voucher_prefix: "PB",
    labor_formula: LaborFormula::GrossBased,
    net_weight_source: NetWeightSource::Supplied,
    amount_basis: AmountBasis::ItemAmount,
    gst_mode: GstMode::Optional,
    cash_for_silver: CashForSilverPolicy::OffsetsCashBalance,
    tracks_silver_return: false,
};

const GST: ChannelPolicy = ChannelPolicy {
    channel: Channel::Gst,
    voucher_prefix: "GST",
    labor_formula: LaborFormula::GrossBased,
    net_weight_source: NetWeightSource::Supplied,
    amount_basis: AmountBasis::ItemAmount,
    gst_mode: GstMode::OnByDefault,
    cash_for_silver: CashForSilverPolicy::DischargesSilverOnly,
    tracks_silver_return: false,
};

impl Channel {
    /// The static policy for this channel.
    pub const fn policy(&self) -> &'static ChannelPolicy {
        match self {
            Channel::Regular => &REGULAR,
            Channel::Wholesale => &WHOLESALE,
            Channel::Product => &PRODUCT,
            Channel::Gst => &GST,
        }
    }
}

impl ChannelPolicy {
    /// Resolves the GST policy actually applied to a sale.
    ///
    /// `requested` is the caller's override from the sale request.
    pub fn effective_gst(&self, requested: Option<GstPolicy>) -> CoreResult<Option<GstPolicy>> {
        match self.gst_mode {
            GstMode::Never => {
                if requested.is_some() {
                    Err(CoreError::GstNotSupported {
                        channel: self.channel,
                    })
                } else {
                    Ok(None)
                }
            }
            GstMode::Optional => Ok(requested),
            GstMode::OnByDefault => Ok(Some(requested.unwrap_or_default())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
