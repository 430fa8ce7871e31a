//! # argent-core: Pure Business Logic for the Argent Ledger
//!
//! The heart of the dual-balance ledger: every formula, policy and status
//! rule lives here as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Argent Architecture                            │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                    Caller (API / app layer)                   │ │
//! │  │   create_sale, add_cash_payment, add_silver_return, ...       │ │
//! │  └───────────────────────────────┬───────────────────────────────┘ │
//! │                                  │                                 │
//! │  ┌───────────────────────────────▼───────────────────────────────┐ │
//! │  │                  argent-db (LedgerEngine)                     │ │
//! │  │   transactions, voucher sequencing, repositories              │ │
//! │  └───────────────────────────────┬───────────────────────────────┘ │
//! │                                  │                                 │
//! │  ┌───────────────────────────────▼───────────────────────────────┐ │
//! │  │               ★ argent-core (THIS CRATE) ★                    │ │
//! │  │                                                               │ │
//! │  │   ┌────────┐ ┌────────┐ ┌─────────┐ ┌────────┐ ┌──────────┐  │ │
//! │  │   │ money  │ │ weight │ │ formula │ │ policy │ │  status  │  │ │
//! │  │   │ Money  │ │ Weight │ │ silver, │ │ 4 chan │ │ resolve  │  │ │
//! │  │   │ paise  │ │   mg   │ │ labor   │ │ knobs  │ │ settle   │  │ │
//! │  │   └────────┘ └────────┘ └─────────┘ └────────┘ └──────────┘  │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS            │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` in integer paise (no floating point)
//! - [`weight`] - `Weight` in integer milligrams
//! - [`types`] - domain types (Customer, Sale, LedgerEntry, ...)
//! - [`formula`] - the formula engine (silver weight, labor, amounts, GST)
//! - [`policy`] - per-channel policy table
//! - [`status`] - payment status resolution and settlement tolerances
//! - [`validation`] - input validation
//! - [`error`] - domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output, no hidden clock or rate
//! 2. **No I/O**: database, network and file access are forbidden here
//! 3. **Integer units**: paise and milligrams, rounded once per derived field
//! 4. **Explicit errors**: typed enums, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod formula;
pub mod money;
pub mod policy;
pub mod status;
pub mod types;
pub mod validation;
pub mod weight;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use argent_core::Money` instead of
// `use argent_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use formula::{ComputedLine, LineInput, SaleTotals};
pub use money::Money;
pub use policy::{
    AmountBasis, CashForSilverPolicy, ChannelPolicy, GstMode, GstPolicy, LaborFormula,
    NetWeightSource,
};
pub use types::*;
pub use weight::Weight;
