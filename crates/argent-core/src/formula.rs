//! # Formula Engine
//!
//! Pure functions turning raw item measurements into fine-silver weight,
//! labor charges and item amounts, plus the per-sale aggregates.
//!
//! ## The Formulas
//! ```text
//! silverWeight = (touch + wastage) * netWeight / 100
//!
//! laborCharges (gross-based) = (grossWeight / 1000) * ratePerKg
//! laborCharges (net-based)   = (netWeight * ratePerKg) / 1000
//!
//! itemAmount = silverWeight * silverRate + laborCharges
//!
//! cgst = subtotal * cgstPercent / 100
//! sgst = subtotal * sgstPercent / 100
//! totalAmount = subtotal + cgst + sgst
//! ```
//!
//! All arithmetic is integer (mg, paise, bps) with i128 intermediates.
//! Each derived field rounds half-up exactly once, at the point it is
//! computed from raw inputs; aggregates sum the already-rounded per-line
//! values that get persisted, so rounding never compounds.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::policy::{AmountBasis, ChannelPolicy, GstPolicy, LaborFormula, NetWeightSource};
use crate::types::Percent;
use crate::weight::Weight;

// =============================================================================
// Line Input
// =============================================================================

/// Raw measurements for one voucher line, as entered at the counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineInput {
    pub description: String,
    /// Hallmark stamp; stored as `-` when the piece carries none.
    pub stamp: Option<String>,
    /// Piece count, defaulting to 1.
    pub pieces: Option<i64>,
    pub gross_weight: Weight,
    /// Stone weight, defaulting to zero.
    pub stone_weight: Option<Weight>,
    /// Net weight; required on channels that take it directly, ignored on
    /// channels that derive it as gross minus stone.
    pub net_weight: Option<Weight>,
    pub wastage: Percent,
    pub touch: Percent,
    pub labor_rate_per_kg: Money,
    /// Inventory product to decrement, if the line sells tracked stock.
    pub product_id: Option<i64>,
}

impl LineInput {
    pub fn pieces(&self) -> i64 {
        self.pieces.unwrap_or(1)
    }

    pub fn stone_weight(&self) -> Weight {
        self.stone_weight.unwrap_or_else(Weight::zero)
    }
}

// =============================================================================
// Computed Line
// =============================================================================

/// One line with every derived field resolved, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedLine {
    pub description: String,
    pub stamp: Option<String>,
    pub pieces: i64,
    pub gross_weight: Weight,
    pub stone_weight: Weight,
    pub net_weight: Weight,
    pub wastage: Percent,
    pub touch: Percent,
    pub silver_weight: Weight,
    pub labor_rate_per_kg: Money,
    pub labor_charges: Money,
    pub item_amount: Money,
    pub product_id: Option<i64>,
}

// =============================================================================
// Sale Totals
// =============================================================================

/// Aggregates over a sale's computed lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaleTotals {
    pub total_net_weight: Weight,
    /// Sum of per-line wastage rates, kept for voucher display parity.
    pub total_wastage: Percent,
    pub total_silver_weight: Weight,
    pub total_labor_charges: Money,
    pub subtotal: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub total_amount: Money,
}

// =============================================================================
// Core Formulas
// =============================================================================

/// Fine-silver weight of a piece: `(touch + wastage) * net / 100`.
///
/// ## Example
/// ```rust
/// use argent_core::formula::silver_weight;
/// use argent_core::types::Percent;
/// use argent_core::weight::Weight;
///
/// // 92% touch + 2% wastage on 100g net = 94.000g fine
/// let fine = silver_weight(Weight::from_grams(100), Percent::from_percent(92), Percent::from_percent(2));
/// assert_eq!(fine, Weight::from_milligrams(94_000));
/// ```
pub fn silver_weight(net: Weight, touch: Percent, wastage: Percent) -> Weight {
    let bps = touch.plus(wastage).bps() as i128;
    let mg = (net.milligrams() as i128 * bps + 5_000) / 10_000;
    Weight::from_milligrams(mg as i64)
}

/// Labor charge for a piece under the given strategy.
///
/// The rate is per kilogram, the weights are in milligrams, so the divisor
/// is 1_000_000 either way; the strategies differ only in which weight they
/// charge on.
pub fn labor_charges(formula: LaborFormula, gross: Weight, net: Weight, rate_per_kg: Money) -> Money {
    let basis = match formula {
        LaborFormula::GrossBased => gross,
        LaborFormula::NetBased => net,
    };
    let paise = (basis.milligrams() as i128 * rate_per_kg.paise() as i128 + 500_000) / 1_000_000;
    Money::from_paise(paise as i64)
}

/// Value of a silver weight at a per-gram rate.
pub fn silver_value(weight: Weight, rate_per_gram: Money) -> Money {
    let paise = (weight.milligrams() as i128 * rate_per_gram.paise() as i128 + 500) / 1_000;
    Money::from_paise(paise as i64)
}

// =============================================================================
// Line + Sale Computation
// =============================================================================

/// Computes all derived fields for one line under a channel policy.
///
/// Assumes the input already passed [`crate::validation::validate_line_input`].
pub fn compute_line(input: &LineInput, policy: &ChannelPolicy, silver_rate: Money) -> ComputedLine {
    let stone = input.stone_weight();
    let net = match policy.net_weight_source {
        NetWeightSource::GrossMinusStone => input.gross_weight - stone,
        NetWeightSource::Supplied => input.net_weight.unwrap_or(input.gross_weight - stone),
    };

    let silver = silver_weight(net, input.touch, input.wastage);
    let labor = labor_charges(
        policy.labor_formula,
        input.gross_weight,
        net,
        input.labor_rate_per_kg,
    );
    let item_amount = match policy.amount_basis {
        AmountBasis::LaborOnly => labor,
        AmountBasis::ItemAmount => silver_value(silver, silver_rate) + labor,
    };

    ComputedLine {
        description: input.description.trim().to_string(),
        stamp: input
            .stamp
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        pieces: input.pieces(),
        gross_weight: input.gross_weight,
        stone_weight: stone,
        net_weight: net,
        wastage: input.wastage,
        touch: input.touch,
        silver_weight: silver,
        labor_rate_per_kg: input.labor_rate_per_kg,
        labor_charges: labor,
        item_amount,
        product_id: input.product_id,
    }
}

/// Sums computed lines into sale totals, applying GST when supplied.
pub fn compute_totals(lines: &[ComputedLine], gst: Option<GstPolicy>) -> SaleTotals {
    let subtotal: Money = lines.iter().map(|l| l.item_amount).sum();

    let (cgst, sgst) = match gst {
        Some(g) => (subtotal.percent_of(g.cgst), subtotal.percent_of(g.sgst)),
        None => (Money::zero(), Money::zero()),
    };

    SaleTotals {
        total_net_weight: lines.iter().map(|l| l.net_weight).sum(),
        total_wastage: Percent::from_bps(lines.iter().map(|l| l.wastage.bps()).sum()),
        total_silver_weight: lines.iter().map(|l| l.silver_weight).sum(),
        total_labor_charges: lines.iter().map(|l| l.labor_charges).sum(),
        subtotal,
        cgst,
        sgst,
        total_amount: subtotal + cgst + sgst,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
