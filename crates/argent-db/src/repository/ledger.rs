//! # Ledger Entry Writer
//!
//! Insert helper for the append-only audit trail. Entries are only ever
//! written inside an engine transaction, so the insert takes the open
//! transaction rather than the pool.

use chrono::Utc;
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;

use argent_core::{EntryType, LedgerEntry, Money, Weight};

use crate::error::DbResult;

/// Everything needed to append one ledger entry.
///
/// Balances are the customer's, captured around this single event.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub customer_id: i64,
    pub sale_id: Option<i64>,
    pub entry_type: EntryType,
    pub weight_delta: Weight,
    pub cash_delta: Money,
    pub cash_amount: Money,
    pub silver_rate: Money,
    pub balance_weight_before: Weight,
    pub balance_weight_after: Weight,
    pub balance_cash_before: Money,
    pub balance_cash_after: Money,
    pub notes: Option<String>,
    pub created_by: i64,
}

/// Appends one entry inside the caller's transaction and returns it.
pub async fn append(tx: &mut Transaction<'_, Sqlite>, new: NewEntry) -> DbResult<LedgerEntry> {
    let id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let entry: LedgerEntry = sqlx::query_as(
        r#"
        INSERT INTO ledger_entries (
            id, customer_id, sale_id, entry_type,
            weight_delta, cash_delta, cash_amount, silver_rate,
            balance_weight_before, balance_weight_after,
            balance_cash_before, balance_cash_after,
            notes, created_by, created_at
        ) VALUES (
            ?1, ?2, ?3, ?4,
            ?5, ?6, ?7, ?8,
            ?9, ?10,
            ?11, ?12,
            ?13, ?14, ?15
        )
        RETURNING *
        "#,
    )
    .bind(&id)
    .bind(new.customer_id)
    .bind(new.sale_id)
    .bind(new.entry_type)
    .bind(new.weight_delta)
    .bind(new.cash_delta)
    .bind(new.cash_amount)
    .bind(new.silver_rate)
    .bind(new.balance_weight_before)
    .bind(new.balance_weight_after)
    .bind(new.balance_cash_before)
    .bind(new.balance_cash_after)
    .bind(new.notes)
    .bind(new.created_by)
    .bind(now)
    .fetch_one(&mut **tx)
    .await?;

    Ok(entry)
}
