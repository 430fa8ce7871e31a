//! # Sale Repository
//!
//! Read access to sales, their line items and their ledger entries.
//!
//! Sales are created, settled and deleted only through
//! [`crate::engine::LedgerEngine`]; there is deliberately no `insert_sale`
//! here that could bypass the voucher sequencer or the balance updates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use argent_core::{Channel, LedgerEntry, Money, Sale, SaleItem, Weight};

use crate::error::DbResult;

/// Repository for sale read operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

/// Aggregates over one channel's sales for one business day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailySummary {
    pub sales_count: i64,
    pub total_silver_weight: Weight,
    pub total_amount: Money,
    pub paid_weight: Weight,
    pub paid_cash: Money,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as("SELECT * FROM sales WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Gets a sale by voucher number.
    pub async fn get_by_voucher(&self, voucher_number: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as("SELECT * FROM sales WHERE voucher_number = ?1")
            .bind(voucher_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// All line items for a sale, in insertion order.
    pub async fn items(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as("SELECT * FROM sale_items WHERE sale_id = ?1 ORDER BY id")
            .bind(sale_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// All ledger entries for a sale, in insertion order.
    pub async fn entries(&self, sale_id: i64) -> DbResult<Vec<LedgerEntry>> {
        let entries =
            sqlx::query_as("SELECT * FROM ledger_entries WHERE sale_id = ?1 ORDER BY rowid")
                .bind(sale_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(entries)
    }

    /// All sales for a customer, newest first.
    pub async fn list_for_customer(&self, customer_id: i64) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as(
            "SELECT * FROM sales WHERE customer_id = ?1 ORDER BY sale_date DESC, id DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Day totals for one channel: sale count, silver moved, amounts billed
    /// and paid. Rendering is the caller's concern.
    pub async fn daily_summary(&self, channel: Channel, day: NaiveDate) -> DbResult<DailySummary> {
        let summary = sqlx::query_as(
            r#"
            SELECT
                COUNT(*)                          AS sales_count,
                COALESCE(SUM(total_silver_weight), 0) AS total_silver_weight,
                COALESCE(SUM(total_amount), 0)        AS total_amount,
                COALESCE(SUM(paid_weight), 0)         AS paid_weight,
                COALESCE(SUM(paid_cash), 0)           AS paid_cash
            FROM sales
            WHERE channel = ?1 AND sale_date = ?2
            "#,
        )
        .bind(channel.as_str())
        .bind(day)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
