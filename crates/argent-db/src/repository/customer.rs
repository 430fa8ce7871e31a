//! # Customer Repository
//!
//! Directory operations for trading customers.
//!
//! Balances live on the customer row but are written exclusively by the
//! settlement engine; this repository only creates, looks up and removes
//! customers. Removal is refused while any sale references the customer, so
//! ledger history stays intact.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use argent_core::validation::validate_customer_name;
use argent_core::{Customer, LedgerEntry};

use crate::error::{DbError, DbResult};

/// Repository for customer directory operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Creates a customer with zero balances.
    ///
    /// A customer with the same name and phone already on file is a
    /// conflict, matching the directory's create-by-phone contract.
    pub async fn create(
        &self,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> DbResult<Customer> {
        validate_customer_name(name)?;

        let name = name.trim();
        let phone = phone.map(str::trim).filter(|p| !p.is_empty());
        let address = address.map(str::trim).filter(|a| !a.is_empty());

        if let Some(phone) = phone {
            let existing: Option<i64> =
                sqlx::query_scalar("SELECT id FROM customers WHERE name = ?1 AND phone = ?2")
                    .bind(name)
                    .bind(phone)
                    .fetch_optional(&self.pool)
                    .await?;
            if existing.is_some() {
                return Err(DbError::conflict(format!(
                    "customer '{name}' with phone {phone} already exists"
                )));
            }
        }

        let now = Utc::now();
        debug!(name = %name, "creating customer");

        let customer: Customer = sqlx::query_as(
            r#"
            INSERT INTO customers (name, phone, address, balance_weight, balance_cash, created_at, updated_at)
            VALUES (?1, ?2, ?3, 0, 0, ?4, ?4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(phone)
        .bind(address)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Gets a customer by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as("SELECT * FROM customers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Looks a customer up by phone number.
    pub async fn find_by_phone(&self, phone: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as("SELECT * FROM customers WHERE phone = ?1")
            .bind(phone.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Deletes a customer.
    ///
    /// Fails with `Conflict` while any sale or ledger entry references the
    /// customer; history is never orphaned.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let sales: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE customer_id = ?1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        if sales > 0 {
            return Err(DbError::conflict(format!(
                "customer {id} has {sales} sales on file and cannot be deleted"
            )));
        }

        let entries: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ledger_entries WHERE customer_id = ?1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if entries > 0 {
            return Err(DbError::conflict(format!(
                "customer {id} has ledger history and cannot be deleted"
            )));
        }

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        debug!(id, "customer deleted");
        Ok(())
    }

    /// Full ledger for a customer, oldest entry first.
    pub async fn ledger(&self, customer_id: i64) -> DbResult<Vec<LedgerEntry>> {
        let entries = sqlx::query_as(
            "SELECT * FROM ledger_entries WHERE customer_id = ?1 ORDER BY created_at, rowid",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
