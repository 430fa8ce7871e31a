//! # Repositories
//!
//! One repository per aggregate. Repositories handle plain reads and
//! administrative writes; every balance-mutating path goes through
//! [`crate::engine::LedgerEngine`] so it lands inside a settlement
//! transaction.

pub mod customer;
pub mod inventory;
pub mod ledger;
pub mod sale;
