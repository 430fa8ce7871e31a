//! # argent-db: Ledger Store and Settlement Engine
//!
//! SQLite persistence for the Argent dual-balance ledger, plus the
//! [`LedgerEngine`] that owns every balance-mutating transaction.
//!
//! ## Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Database (pool.rs)          connection pool, WAL, migrations       │
//! │     │                                                               │
//! │     ├── CustomerRepository   directory reads, ledger listing        │
//! │     ├── SaleRepository       sale/item/entry reads, day summaries   │
//! │     ├── InventoryRepository  tracked stock                          │
//! │     │                                                               │
//! │     └── LedgerEngine         create_sale, add_*_payment,            │
//! │            │                 add_silver_return, delete_sale         │
//! │            ├── voucher       atomic per-(channel, day) sequence     │
//! │            └── ledger        append-only audit entries              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Formulas, policies and status rules live in `argent-core`; this crate
//! only decides what happens inside a transaction and in what order.

pub mod engine;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod voucher;

// Re-exports for convenience
pub use engine::{CreateSaleRequest, LedgerEngine, SaleOutcome};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::customer::CustomerRepository;
pub use repository::inventory::InventoryRepository;
pub use repository::sale::{DailySummary, SaleRepository};
