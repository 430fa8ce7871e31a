//! # Inventory Repository
//!
//! Stock tracking for product-linked sale lines.
//!
//! The decrement is best effort: a sale line naming an unknown product is
//! not an error, the sale simply carries no stock movement for that line.
//! Quantities floor at zero rather than going negative, matching how the
//! counter actually operates (stock counts drift and get corrected).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use argent_core::Weight;

use crate::error::{DbError, DbResult};

/// A tracked inventory product.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub pieces: i64,
    pub gross_weight: Weight,
    pub net_weight: Weight,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

/// Repository for inventory operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Registers a product with its opening stock.
    pub async fn create(
        &self,
        name: &str,
        pieces: i64,
        gross_weight: Weight,
        net_weight: Weight,
    ) -> DbResult<Product> {
        if name.trim().is_empty() {
            return Err(DbError::InvalidArgument("product name is required".into()));
        }

        let now = Utc::now();
        let product: Product = sqlx::query_as(
            r#"
            INSERT INTO products (name, pieces, gross_weight, net_weight, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            RETURNING *
            "#,
        )
        .bind(name.trim())
        .bind(pieces)
        .bind(gross_weight)
        .bind(net_weight)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as("SELECT * FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }
}

/// Decrements stock for a sold line inside the caller's transaction.
///
/// Returns whether a product row was actually updated.
pub async fn decrement_stock(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: i64,
    pieces: i64,
    gross_weight: Weight,
    net_weight: Weight,
) -> DbResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE products SET
            pieces = MAX(0, pieces - ?2),
            gross_weight = MAX(0, gross_weight - ?3),
            net_weight = MAX(0, net_weight - ?4),
            updated_at = ?5
        WHERE id = ?1
        "#,
    )
    .bind(product_id)
    .bind(pieces)
    .bind(gross_weight)
    .bind(net_weight)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    let updated = result.rows_affected() > 0;
    if updated {
        debug!(product_id, pieces, "stock decremented");
    } else {
        debug!(product_id, "sale line references unknown product, no stock movement");
    }

    Ok(updated)
}
