//! # Ledger Engine
//!
//! The settlement and payment processors: every operation that moves a
//! customer balance lives here, inside a single SQLite transaction.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     One Settlement Transaction                      │
//! │                                                                     │
//! │  create_sale(request)                                               │
//! │     │                                                               │
//! │     ├─ 1. validate lines, rate, payments   (before any write)       │
//! │     ├─ 2. voucher counter UPSERT           (first write: lock)      │
//! │     ├─ 3. load customer                    → NotFound               │
//! │     ├─ 4. formula engine                   (pure, argent-core)      │
//! │     ├─ 5. insert sale + items                                       │
//! │     ├─ 6. append 'sale' ledger entry       (debits both balances)   │
//! │     ├─ 7. apply immediate payments         (same path as post-sale) │
//! │     ├─ 8. decrement inventory              (best effort)            │
//! │     ├─ 9. write customer + closing snapshot, resolve status         │
//! │     └─ COMMIT (or roll back the whole unit of work)                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! SQLite has no row locks, so "lock the customer row" is rendered as a
//! write issued first in every mutating transaction: the voucher UPSERT for
//! sale creation, a no-op touch UPDATE of the customer row for payments and
//! deletes. The first write acquires the database write lock immediately,
//! which makes concurrent engine operations queue on the busy timeout
//! instead of failing a read-to-write upgrade mid-transaction. Reads stay
//! concurrent under WAL.
//!
//! The engine does not retry and does not deduplicate: a caller that
//! retries a timed-out call owns its own idempotence key.

use chrono::{NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use argent_core::formula::{compute_line, compute_totals, ComputedLine};
use argent_core::status;
use argent_core::validation::{
    validate_line_input, validate_payment_event, validate_silver_rate,
};
use argent_core::{
    AmountBasis, CashForSilverPolicy, Channel, ChannelPolicy, CoreError, Customer, EntryType,
    GstPolicy, LedgerEntry, LineInput, Money, PaymentEvent, Sale, SaleItem, SilverReturnStatus,
    ValidationError, Weight,
};

use crate::error::{DbError, DbResult};
use crate::repository::inventory::decrement_stock;
use crate::repository::ledger::{self, NewEntry};
use crate::voucher;

// =============================================================================
// Requests and Outcomes
// =============================================================================

/// Everything needed to create one sale.
#[derive(Debug, Clone)]
pub struct CreateSaleRequest {
    pub customer_id: i64,
    pub channel: Channel,
    /// Business date; scopes the voucher sequence. Passed in, never read
    /// from a clock.
    pub sale_date: NaiveDate,
    pub lines: Vec<LineInput>,
    /// Rate per gram for item amounts. Ignored (and stored as zero) on
    /// labor-only channels.
    pub silver_rate: Money,
    /// GST override; `None` lets the channel policy decide.
    pub gst: Option<GstPolicy>,
    /// Settlement events applied within the sale's own transaction.
    pub immediate_payments: Vec<PaymentEvent>,
    pub notes: Option<String>,
    /// Actor id from the external auth layer.
    pub created_by: i64,
}

/// The updated view returned by every engine operation.
#[derive(Debug, Clone)]
pub struct SaleOutcome {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    /// This sale's ledger entries, oldest first.
    pub entries: Vec<LedgerEntry>,
    /// The owning customer with current balances.
    pub customer: Customer,
}

// =============================================================================
// Ledger Engine
// =============================================================================

/// Settlement and payment processor over a SQLite pool.
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    pool: SqlitePool,
}

impl LedgerEngine {
    /// Creates a new LedgerEngine.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerEngine { pool }
    }

    // =========================================================================
    // Settlement Processor
    // =========================================================================

    /// Creates a sale: totals, voucher, balance debits, audit entries and
    /// any same-transaction payments, atomically.
    pub async fn create_sale(&self, req: CreateSaleRequest) -> DbResult<SaleOutcome> {
        let policy = req.channel.policy();

        // Validation happens before any write is attempted.
        if req.lines.is_empty() {
            return Err(ValidationError::Required {
                field: "lines".to_string(),
            }
            .into());
        }
        for line in &req.lines {
            validate_line_input(line, policy)?;
        }
        validate_silver_rate(req.silver_rate, policy)?;
        for event in &req.immediate_payments {
            validate_payment_event(event)?;
            if matches!(event, PaymentEvent::SilverReturn { .. }) && !policy.tracks_silver_return {
                return Err(CoreError::SilverReturnNotSupported {
                    channel: req.channel,
                }
                .into());
            }
        }
        let gst = policy.effective_gst(req.gst)?;

        let mut tx = self.pool.begin().await?;

        // First statement is a write: mints the voucher and takes the
        // database write lock for the rest of the unit of work.
        let voucher_number = voucher::next_voucher(&mut tx, policy, req.sale_date).await?;

        let mut customer: Customer = sqlx::query_as("SELECT * FROM customers WHERE id = ?1")
            .bind(req.customer_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", req.customer_id))?;

        let silver_rate = match policy.amount_basis {
            AmountBasis::LaborOnly => Money::zero(),
            AmountBasis::ItemAmount => req.silver_rate,
        };
        let lines: Vec<ComputedLine> = req
            .lines
            .iter()
            .map(|l| compute_line(l, policy, silver_rate))
            .collect();
        let totals = compute_totals(&lines, gst);

        let previous_weight = customer.balance_weight;
        let previous_cash = customer.balance_cash;
        customer.balance_weight += totals.total_silver_weight;
        customer.balance_cash += totals.total_amount;

        let (silver_to_return, return_status) = if policy.tracks_silver_return {
            (totals.total_silver_weight, SilverReturnStatus::Pending)
        } else {
            (Weight::zero(), SilverReturnStatus::NotApplicable)
        };

        let now = Utc::now();
        debug!(voucher = %voucher_number, customer_id = req.customer_id, "inserting sale");

        let mut sale: Sale = sqlx::query_as(
            r#"
            INSERT INTO sales (
                voucher_number, customer_id, channel, sale_date, silver_rate,
                total_net_weight, total_wastage, total_silver_weight,
                total_labor_charges, subtotal, cgst, sgst, total_amount,
                previous_balance_weight, previous_balance_cash,
                closing_balance_weight, closing_balance_cash,
                paid_weight, paid_cash, balance_weight, balance_cash,
                silver_to_return, silver_returned, silver_return_status,
                status, notes, created_by, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                ?6, ?7, ?8,
                ?9, ?10, ?11, ?12, ?13,
                ?14, ?15,
                ?16, ?17,
                0, 0, ?18, ?19,
                ?20, 0, ?21,
                'pending', ?22, ?23, ?24, ?24
            )
            RETURNING *
            "#,
        )
        .bind(&voucher_number)
        .bind(req.customer_id)
        .bind(req.channel)
        .bind(req.sale_date)
        .bind(silver_rate)
        .bind(totals.total_net_weight)
        .bind(totals.total_wastage)
        .bind(totals.total_silver_weight)
        .bind(totals.total_labor_charges)
        .bind(totals.subtotal)
        .bind(totals.cgst)
        .bind(totals.sgst)
        .bind(totals.total_amount)
        .bind(previous_weight)
        .bind(previous_cash)
        .bind(customer.balance_weight)
        .bind(customer.balance_cash)
        .bind(totals.total_silver_weight)
        .bind(totals.total_amount)
        .bind(silver_to_return)
        .bind(return_status)
        .bind(&req.notes)
        .bind(req.created_by)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        for line in &lines {
            insert_item(&mut tx, sale.id, line, now).await?;
        }

        // The debit entry. Immediate payments append their own entries
        // behind it, in order.
        ledger::append(
            &mut tx,
            NewEntry {
                customer_id: customer.id,
                sale_id: Some(sale.id),
                entry_type: EntryType::Sale,
                weight_delta: totals.total_silver_weight,
                cash_delta: totals.total_amount,
                cash_amount: Money::zero(),
                silver_rate,
                balance_weight_before: previous_weight,
                balance_weight_after: customer.balance_weight,
                balance_cash_before: previous_cash,
                balance_cash_after: customer.balance_cash,
                notes: Some(format!("Sale created: {voucher_number}")),
                created_by: req.created_by,
            },
        )
        .await?;

        for event in &req.immediate_payments {
            self.apply_payment(&mut tx, policy, &mut sale, &mut customer, *event, None, req.created_by)
                .await?;
        }

        for line in &lines {
            if let Some(product_id) = line.product_id {
                decrement_stock(&mut tx, product_id, line.pieces, line.gross_weight, line.net_weight)
                    .await?;
            }
        }

        // The closing snapshot covers every creation-time entry, immediate
        // payments included, and is never touched again.
        sale.closing_balance_weight = customer.balance_weight;
        sale.closing_balance_cash = customer.balance_cash;
        sale.status = status::resolve(sale.balance_weight, sale.balance_cash, any_payment(&sale));

        persist_sale(&mut tx, &sale).await?;
        persist_customer(&mut tx, &customer).await?;

        let outcome = load_outcome(&mut tx, sale.id).await?;
        tx.commit().await?;

        info!(
            voucher = %outcome.sale.voucher_number,
            customer_id = outcome.customer.id,
            silver = %outcome.sale.total_silver_weight,
            amount = %outcome.sale.total_amount,
            "sale created"
        );
        Ok(outcome)
    }

    // =========================================================================
    // Payment Processor
    // =========================================================================

    /// Applies one settlement event against an existing sale.
    ///
    /// The four named wrappers below are the public surface; this is the
    /// single code path they and `create_sale` share.
    pub async fn add_payment(
        &self,
        sale_id: i64,
        event: PaymentEvent,
        notes: Option<String>,
        created_by: i64,
    ) -> DbResult<SaleOutcome> {
        validate_payment_event(&event)?;

        let mut tx = self.pool.begin().await?;
        lock_customer_of_sale(&mut tx, sale_id).await?;

        let mut sale: Sale = sqlx::query_as("SELECT * FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Sale", sale_id))?;

        let mut customer: Customer = sqlx::query_as("SELECT * FROM customers WHERE id = ?1")
            .bind(sale.customer_id)
            .fetch_one(&mut *tx)
            .await?;

        let policy = sale.channel.policy();
        self.apply_payment(&mut tx, policy, &mut sale, &mut customer, event, notes, created_by)
            .await?;

        persist_sale(&mut tx, &sale).await?;
        persist_customer(&mut tx, &customer).await?;

        let outcome = load_outcome(&mut tx, sale.id).await?;
        tx.commit().await?;

        info!(
            voucher = %outcome.sale.voucher_number,
            status = ?outcome.sale.status,
            "payment applied"
        );
        Ok(outcome)
    }

    /// Cash against the labor balance.
    pub async fn add_cash_payment(
        &self,
        sale_id: i64,
        amount: Money,
        notes: Option<String>,
        created_by: i64,
    ) -> DbResult<SaleOutcome> {
        self.add_payment(sale_id, PaymentEvent::Cash { amount }, notes, created_by)
            .await
    }

    /// Physical fine silver against the weight balance.
    pub async fn add_silver_payment(
        &self,
        sale_id: i64,
        weight: Weight,
        notes: Option<String>,
        created_by: i64,
    ) -> DbResult<SaleOutcome> {
        self.add_payment(sale_id, PaymentEvent::Silver { weight }, notes, created_by)
            .await
    }

    /// Cash paid in lieu of silver at an agreed rate per gram.
    pub async fn add_cash_for_silver(
        &self,
        sale_id: i64,
        weight: Weight,
        rate: Money,
        notes: Option<String>,
        created_by: i64,
    ) -> DbResult<SaleOutcome> {
        self.add_payment(
            sale_id,
            PaymentEvent::CashForSilver { weight, rate },
            notes,
            created_by,
        )
        .await
    }

    /// Physical silver returned against a wholesale obligation.
    pub async fn add_silver_return(
        &self,
        sale_id: i64,
        weight: Weight,
        notes: Option<String>,
        created_by: i64,
    ) -> DbResult<SaleOutcome> {
        self.add_payment(
            sale_id,
            PaymentEvent::SilverReturn { weight },
            notes,
            created_by,
        )
        .await
    }

    /// Manual balance adjustment outside any sale.
    ///
    /// Records an `adjustment` ledger entry applying the signed deltas to
    /// the customer's balances.
    pub async fn add_adjustment(
        &self,
        customer_id: i64,
        weight_delta: Weight,
        cash_delta: Money,
        notes: Option<String>,
        created_by: i64,
    ) -> DbResult<LedgerEntry> {
        if weight_delta.is_zero() && cash_delta.is_zero() {
            return Err(DbError::InvalidArgument(
                "adjustment must move at least one balance".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        // Touch write first: pins the customer row and the write lock.
        let locked = sqlx::query("UPDATE customers SET updated_at = updated_at WHERE id = ?1")
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;
        if locked.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", customer_id));
        }

        let mut customer: Customer = sqlx::query_as("SELECT * FROM customers WHERE id = ?1")
            .bind(customer_id)
            .fetch_one(&mut *tx)
            .await?;

        let weight_before = customer.balance_weight;
        let cash_before = customer.balance_cash;
        customer.balance_weight += weight_delta;
        customer.balance_cash += cash_delta;

        let entry = ledger::append(
            &mut tx,
            NewEntry {
                customer_id,
                sale_id: None,
                entry_type: EntryType::Adjustment,
                weight_delta,
                cash_delta,
                cash_amount: Money::zero(),
                silver_rate: Money::zero(),
                balance_weight_before: weight_before,
                balance_weight_after: customer.balance_weight,
                balance_cash_before: cash_before,
                balance_cash_after: customer.balance_cash,
                notes,
                created_by,
            },
        )
        .await?;

        persist_customer(&mut tx, &customer).await?;
        tx.commit().await?;

        info!(customer_id, weight = %weight_delta, cash = %cash_delta, "adjustment recorded");
        Ok(entry)
    }

    /// Deletes a sale, reversing its entire balance impact.
    ///
    /// The reversal subtracts the sum of the sale's ledger entry deltas
    /// from the customer, then removes the entries, the items and the sale
    /// row, all in one transaction. After the commit the customer stands
    /// exactly where they would had the sale never happened.
    pub async fn delete_sale(&self, sale_id: i64) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        lock_customer_of_sale(&mut tx, sale_id).await?;

        let sale: Sale = sqlx::query_as("SELECT * FROM sales WHERE id = ?1")
            .bind(sale_id)
            .fetch_one(&mut *tx)
            .await?;

        let (weight_impact, cash_impact): (Weight, Money) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(weight_delta), 0), COALESCE(SUM(cash_delta), 0)
            FROM ledger_entries
            WHERE sale_id = ?1
            "#,
        )
        .bind(sale_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE customers SET
                balance_weight = balance_weight - ?2,
                balance_cash = balance_cash - ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(sale.customer_id)
        .bind(weight_impact)
        .bind(cash_impact)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM ledger_entries WHERE sale_id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM sale_items WHERE sale_id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(
            voucher = %sale.voucher_number,
            weight = %weight_impact,
            cash = %cash_impact,
            "sale deleted and balance impact reversed"
        );
        Ok(())
    }

    // =========================================================================
    // Shared Payment Path
    // =========================================================================

    /// Applies one event to the in-memory sale and customer and appends its
    /// ledger entry. The caller persists both rows afterwards.
    #[allow(clippy::too_many_arguments)]
    async fn apply_payment(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        policy: &ChannelPolicy,
        sale: &mut Sale,
        customer: &mut Customer,
        event: PaymentEvent,
        notes: Option<String>,
        created_by: i64,
    ) -> DbResult<LedgerEntry> {
        let weight_before = customer.balance_weight;
        let cash_before = customer.balance_cash;

        let mut weight_delta = Weight::zero();
        let mut cash_delta = Money::zero();
        let mut cash_amount = Money::zero();
        let mut entry_rate = Money::zero();

        let default_note = match event {
            PaymentEvent::Cash { amount } => {
                cash_delta = -amount;
                cash_amount = amount;
                sale.paid_cash += amount;
                sale.balance_cash -= amount;
                format!("Cash payment: {amount}")
            }
            PaymentEvent::Silver { weight } => {
                weight_delta = -weight;
                sale.paid_weight += weight;
                sale.balance_weight -= weight;
                format!("Silver payment: {weight}")
            }
            PaymentEvent::CashForSilver { weight, rate } => {
                let value = argent_core::formula::silver_value(weight, rate);
                weight_delta = -weight;
                cash_amount = value;
                entry_rate = rate;
                sale.paid_weight += weight;
                sale.balance_weight -= weight;

                // Channel policy decides whether the cash received also
                // offsets the labor balance or stands apart.
                if policy.cash_for_silver == CashForSilverPolicy::OffsetsCashBalance {
                    cash_delta = -value;
                    sale.paid_cash += value;
                    sale.balance_cash -= value;
                }
                format!("Paid {value} for {weight} @ {rate}/g")
            }
            PaymentEvent::SilverReturn { weight } => {
                if !policy.tracks_silver_return {
                    return Err(CoreError::SilverReturnNotSupported {
                        channel: policy.channel,
                    }
                    .into());
                }
                let remaining = sale.silver_to_return - sale.silver_returned;
                if weight > remaining {
                    return Err(DbError::conflict(format!(
                        "silver return of {weight} exceeds remaining obligation of {remaining}"
                    )));
                }
                weight_delta = -weight;
                sale.silver_returned += weight;
                sale.balance_weight -= weight;
                sale.silver_return_status =
                    status::resolve_return(sale.silver_returned, sale.silver_to_return);
                format!("Silver returned: {weight}")
            }
        };

        customer.balance_weight += weight_delta;
        customer.balance_cash += cash_delta;
        sale.status = status::resolve(sale.balance_weight, sale.balance_cash, any_payment(sale));

        ledger::append(
            tx,
            NewEntry {
                customer_id: customer.id,
                sale_id: Some(sale.id),
                entry_type: event.entry_type(),
                weight_delta,
                cash_delta,
                cash_amount,
                silver_rate: entry_rate,
                balance_weight_before: weight_before,
                balance_weight_after: customer.balance_weight,
                balance_cash_before: cash_before,
                balance_cash_after: customer.balance_cash,
                notes: notes.or(Some(default_note)),
                created_by,
            },
        )
        .await
    }
}

// =============================================================================
// Transaction Helpers
// =============================================================================

/// Whether any settlement event was ever recorded against the sale.
fn any_payment(sale: &Sale) -> bool {
    sale.paid_weight.is_positive()
        || sale.paid_cash.is_positive()
        || sale.silver_returned.is_positive()
}

/// Pins the sale's customer row with a no-op write.
///
/// Doubles as the existence check: zero rows touched means the sale (or its
/// customer) is missing. Issued before any read so the transaction holds
/// the write lock for its whole lifetime.
async fn lock_customer_of_sale(tx: &mut Transaction<'_, Sqlite>, sale_id: i64) -> DbResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE customers SET updated_at = updated_at
        WHERE id = (SELECT customer_id FROM sales WHERE id = ?1)
        "#,
    )
    .bind(sale_id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found("Sale", sale_id));
    }
    Ok(())
}

async fn insert_item(
    tx: &mut Transaction<'_, Sqlite>,
    sale_id: i64,
    line: &ComputedLine,
    now: chrono::DateTime<Utc>,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO sale_items (
            sale_id, product_id, description, stamp, pieces,
            gross_weight, stone_weight, net_weight, wastage, touch,
            silver_weight, labor_rate_per_kg, labor_charges, item_amount,
            created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
        "#,
    )
    .bind(sale_id)
    .bind(line.product_id)
    .bind(&line.description)
    .bind(&line.stamp)
    .bind(line.pieces)
    .bind(line.gross_weight)
    .bind(line.stone_weight)
    .bind(line.net_weight)
    .bind(line.wastage)
    .bind(line.touch)
    .bind(line.silver_weight)
    .bind(line.labor_rate_per_kg)
    .bind(line.labor_charges)
    .bind(line.item_amount)
    .bind(now)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Writes the sale's mutable settlement columns.
///
/// The totals and `previous_balance_*` columns never change after insert;
/// the closing snapshot is written once more at the end of creation and
/// then carried unchanged.
async fn persist_sale(tx: &mut Transaction<'_, Sqlite>, sale: &Sale) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE sales SET
            closing_balance_weight = ?2,
            closing_balance_cash = ?3,
            paid_weight = ?4,
            paid_cash = ?5,
            balance_weight = ?6,
            balance_cash = ?7,
            silver_returned = ?8,
            silver_return_status = ?9,
            status = ?10,
            updated_at = ?11
        WHERE id = ?1
        "#,
    )
    .bind(sale.id)
    .bind(sale.closing_balance_weight)
    .bind(sale.closing_balance_cash)
    .bind(sale.paid_weight)
    .bind(sale.paid_cash)
    .bind(sale.balance_weight)
    .bind(sale.balance_cash)
    .bind(sale.silver_returned)
    .bind(sale.silver_return_status)
    .bind(sale.status)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn persist_customer(tx: &mut Transaction<'_, Sqlite>, customer: &Customer) -> DbResult<()> {
    sqlx::query(
        r#"
        UPDATE customers SET balance_weight = ?2, balance_cash = ?3, updated_at = ?4
        WHERE id = ?1
        "#,
    )
    .bind(customer.id)
    .bind(customer.balance_weight)
    .bind(customer.balance_cash)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

/// Reloads the full sale view inside the transaction, so the outcome
/// reflects exactly what is about to commit.
async fn load_outcome(tx: &mut Transaction<'_, Sqlite>, sale_id: i64) -> DbResult<SaleOutcome> {
    let sale: Sale = sqlx::query_as("SELECT * FROM sales WHERE id = ?1")
        .bind(sale_id)
        .fetch_one(&mut **tx)
        .await?;

    let items: Vec<SaleItem> =
        sqlx::query_as("SELECT * FROM sale_items WHERE sale_id = ?1 ORDER BY id")
            .bind(sale_id)
            .fetch_all(&mut **tx)
            .await?;

    let entries: Vec<LedgerEntry> =
        sqlx::query_as("SELECT * FROM ledger_entries WHERE sale_id = ?1 ORDER BY rowid")
            .bind(sale_id)
            .fetch_all(&mut **tx)
            .await?;

    let customer: Customer = sqlx::query_as("SELECT * FROM customers WHERE id = ?1")
        .bind(sale.customer_id)
        .fetch_one(&mut **tx)
        .await?;

    Ok(SaleOutcome {
        sale,
        items,
        entries,
        customer,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
