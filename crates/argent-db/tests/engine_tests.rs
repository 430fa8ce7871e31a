//! End-to-end settlement engine tests over real SQLite databases.
//!
//! Functional tests run against an in-memory database; the voucher
//! concurrency test uses a file-backed database so multiple connections
//! can contend for the write lock.

use chrono::NaiveDate;

use argent_core::{
    Channel, EntryType, GstPolicy, LineInput, Money, PaymentEvent, PaymentStatus, Percent,
    SilverReturnStatus, Weight,
};
use argent_db::{CreateSaleRequest, Database, DbConfig, DbError};

const ACTOR: i64 = 4;

fn sale_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
}

/// A 150g gross / 100g net piece at 92% touch + 2% wastage, ₹500/kg labor.
/// On gross-based channels at ₹100/g this comes to exactly:
/// silver 94.000g, labor ₹75.00, amount ₹9,475.00.
fn reference_line() -> LineInput {
    LineInput {
        description: "payal".to_string(),
        stamp: Some("925".to_string()),
        pieces: Some(2),
        gross_weight: Weight::from_grams(150),
        stone_weight: None,
        net_weight: Some(Weight::from_grams(100)),
        wastage: Percent::from_percent(2),
        touch: Percent::from_percent(92),
        labor_rate_per_kg: Money::from_rupees(500),
        product_id: None,
    }
}

fn wholesale_request(customer_id: i64) -> CreateSaleRequest {
    CreateSaleRequest {
        customer_id,
        channel: Channel::Wholesale,
        sale_date: sale_day(),
        lines: vec![reference_line()],
        silver_rate: Money::from_rupees(100),
        gst: None,
        immediate_payments: vec![],
        notes: None,
        created_by: ACTOR,
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

async fn test_db() -> Database {
    init_tracing();
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn customer_id(db: &Database) -> i64 {
    db.customers()
        .create("Ramesh Soni", Some("9876543210"), None)
        .await
        .unwrap()
        .id
}

// =============================================================================
// Sale Creation
// =============================================================================

#[tokio::test]
async fn wholesale_sale_debits_both_balances() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let outcome = db.engine().create_sale(wholesale_request(cid)).await.unwrap();

    assert_eq!(outcome.sale.voucher_number, "202608070001");
    assert_eq!(outcome.sale.total_silver_weight, Weight::from_grams(94));
    assert_eq!(outcome.sale.total_labor_charges, Money::from_rupees(75));
    assert_eq!(outcome.sale.total_amount, Money::from_paise(947_500));
    assert_eq!(outcome.sale.status, PaymentStatus::Pending);

    // Customer debited in both units
    assert_eq!(outcome.customer.balance_weight, Weight::from_grams(94));
    assert_eq!(outcome.customer.balance_cash, Money::from_paise(947_500));

    // Snapshots bracket the creation-time entries
    assert_eq!(outcome.sale.previous_balance_weight, Weight::zero());
    assert_eq!(outcome.sale.closing_balance_weight, Weight::from_grams(94));
    assert_eq!(outcome.sale.closing_balance_cash, Money::from_paise(947_500));

    // Wholesale carries the physical return obligation
    assert_eq!(outcome.sale.silver_to_return, Weight::from_grams(94));
    assert_eq!(
        outcome.sale.silver_return_status,
        SilverReturnStatus::Pending
    );

    // One debit entry with before/after for both units
    assert_eq!(outcome.entries.len(), 1);
    let entry = &outcome.entries[0];
    assert_eq!(entry.entry_type, EntryType::Sale);
    assert_eq!(entry.weight_delta, Weight::from_grams(94));
    assert_eq!(entry.cash_delta, Money::from_paise(947_500));
    assert_eq!(entry.balance_weight_before, Weight::zero());
    assert_eq!(entry.balance_weight_after, Weight::from_grams(94));

    assert_eq!(outcome.items.len(), 1);
    assert_eq!(outcome.items[0].item_amount, Money::from_paise(947_500));
}

#[tokio::test]
async fn regular_sale_charges_labor_only_and_derives_net() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let mut line = reference_line();
    line.net_weight = None;
    line.stone_weight = Some(Weight::from_grams(50));

    let outcome = db
        .engine()
        .create_sale(CreateSaleRequest {
            channel: Channel::Regular,
            lines: vec![line],
            silver_rate: Money::zero(),
            ..wholesale_request(cid)
        })
        .await
        .unwrap();

    assert_eq!(outcome.sale.voucher_number, "REG202608070001");
    // net = 150 - 50 = 100g, silver = 94g either way
    assert_eq!(outcome.sale.total_silver_weight, Weight::from_grams(94));
    // net-based labor: 100g at ₹500/kg = ₹50.00, and that is the whole bill
    assert_eq!(outcome.sale.total_labor_charges, Money::from_rupees(50));
    assert_eq!(outcome.sale.total_amount, Money::from_rupees(50));
    assert_eq!(outcome.customer.balance_cash, Money::from_rupees(50));
    // no return obligation outside wholesale
    assert_eq!(outcome.sale.silver_to_return, Weight::zero());
    assert_eq!(
        outcome.sale.silver_return_status,
        SilverReturnStatus::NotApplicable
    );
}

#[tokio::test]
async fn gst_channel_applies_both_components_by_default() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let outcome = db
        .engine()
        .create_sale(CreateSaleRequest {
            channel: Channel::Gst,
            ..wholesale_request(cid)
        })
        .await
        .unwrap();

    // subtotal ₹9,475.00; 1.5% each side = ₹142.13
    assert_eq!(outcome.sale.subtotal, Money::from_paise(947_500));
    assert_eq!(outcome.sale.cgst, Money::from_paise(14_213));
    assert_eq!(outcome.sale.sgst, Money::from_paise(14_213));
    assert_eq!(
        outcome.sale.total_amount,
        Money::from_paise(947_500 + 14_213 + 14_213)
    );
    assert_eq!(outcome.sale.voucher_number, "GST202608070001");
}

#[tokio::test]
async fn gst_on_regular_channel_is_invalid() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let err = db
        .engine()
        .create_sale(CreateSaleRequest {
            channel: Channel::Regular,
            silver_rate: Money::zero(),
            gst: Some(GstPolicy::default()),
            ..wholesale_request(cid)
        })
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::InvalidArgument(_)));
}

#[tokio::test]
async fn sale_for_missing_customer_is_not_found_and_writes_nothing() {
    let db = test_db().await;

    let err = db.engine().create_sale(wholesale_request(999)).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));

    // The aborted transaction released its voucher allocation
    let cid = customer_id(&db).await;
    let outcome = db.engine().create_sale(wholesale_request(cid)).await.unwrap();
    assert_eq!(outcome.sale.voucher_number, "202608070001");
}

#[tokio::test]
async fn empty_lines_and_bad_measurements_are_rejected() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let mut req = wholesale_request(cid);
    req.lines = vec![];
    assert!(matches!(
        db.engine().create_sale(req).await.unwrap_err(),
        DbError::InvalidArgument(_)
    ));

    let mut bad_line = reference_line();
    bad_line.gross_weight = Weight::zero();
    let mut req = wholesale_request(cid);
    req.lines = vec![bad_line];
    assert!(matches!(
        db.engine().create_sale(req).await.unwrap_err(),
        DbError::InvalidArgument(_)
    ));
}

#[tokio::test]
async fn immediate_payments_settle_within_the_sale_transaction() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let mut req = wholesale_request(cid);
    req.immediate_payments = vec![
        PaymentEvent::Silver {
            weight: Weight::from_grams(94),
        },
        PaymentEvent::Cash {
            amount: Money::from_paise(947_500),
        },
    ];

    let outcome = db.engine().create_sale(req).await.unwrap();

    assert_eq!(outcome.sale.status, PaymentStatus::Paid);
    assert_eq!(outcome.entries.len(), 3);
    assert_eq!(outcome.customer.balance_weight, Weight::zero());
    assert_eq!(outcome.customer.balance_cash, Money::zero());
    // Closing snapshot includes the same-transaction payments
    assert_eq!(outcome.sale.closing_balance_weight, Weight::zero());
    assert_eq!(outcome.sale.closing_balance_cash, Money::zero());
}

// =============================================================================
// Payments (₹9,475 bill, ₹1,000 cash → ₹8,475 remaining, partial)
// =============================================================================

#[tokio::test]
async fn cash_payment_reduces_cash_balance_only() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let sale = db.engine().create_sale(wholesale_request(cid)).await.unwrap().sale;

    let outcome = db
        .engine()
        .add_cash_payment(sale.id, Money::from_rupees(1_000), None, ACTOR)
        .await
        .unwrap();

    assert_eq!(outcome.sale.balance_cash, Money::from_paise(847_500));
    assert_eq!(outcome.customer.balance_cash, Money::from_paise(847_500));
    assert_eq!(outcome.sale.paid_cash, Money::from_rupees(1_000));
    assert_eq!(outcome.sale.status, PaymentStatus::Partial);
    // Weight side untouched
    assert_eq!(outcome.sale.balance_weight, Weight::from_grams(94));
    assert_eq!(outcome.customer.balance_weight, Weight::from_grams(94));

    let entry = outcome.entries.last().unwrap();
    assert_eq!(entry.entry_type, EntryType::CashPayment);
    assert_eq!(entry.cash_delta, -Money::from_rupees(1_000));
    assert_eq!(entry.weight_delta, Weight::zero());
}

#[tokio::test]
async fn silver_payment_reduces_weight_balance_only() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let sale = db.engine().create_sale(wholesale_request(cid)).await.unwrap().sale;

    let outcome = db
        .engine()
        .add_silver_payment(sale.id, Weight::from_grams(40), None, ACTOR)
        .await
        .unwrap();

    assert_eq!(outcome.sale.balance_weight, Weight::from_grams(54));
    assert_eq!(outcome.sale.paid_weight, Weight::from_grams(40));
    assert_eq!(outcome.customer.balance_weight, Weight::from_grams(54));
    assert_eq!(outcome.sale.balance_cash, Money::from_paise(947_500));
    assert_eq!(outcome.sale.status, PaymentStatus::Partial);
}

#[tokio::test]
async fn cash_for_silver_discharges_silver_only_on_wholesale() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let sale = db.engine().create_sale(wholesale_request(cid)).await.unwrap().sale;

    let outcome = db
        .engine()
        .add_cash_for_silver(sale.id, Weight::from_grams(10), Money::from_rupees(95), None, ACTOR)
        .await
        .unwrap();

    // Silver obligation discharged
    assert_eq!(outcome.sale.balance_weight, Weight::from_grams(84));
    assert_eq!(outcome.customer.balance_weight, Weight::from_grams(84));
    // Cash balance untouched on this channel; the value rides on the entry
    assert_eq!(outcome.sale.balance_cash, Money::from_paise(947_500));
    assert_eq!(outcome.customer.balance_cash, Money::from_paise(947_500));

    let entry = outcome.entries.last().unwrap();
    assert_eq!(entry.entry_type, EntryType::CashForSilver);
    assert_eq!(entry.weight_delta, -Weight::from_grams(10));
    assert_eq!(entry.cash_delta, Money::zero());
    assert_eq!(entry.cash_amount, Money::from_rupees(950));
    assert_eq!(entry.silver_rate, Money::from_rupees(95));
}

#[tokio::test]
async fn cash_for_silver_offsets_cash_balance_on_product_channel() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let sale = db
        .engine()
        .create_sale(CreateSaleRequest {
            channel: Channel::Product,
            ..wholesale_request(cid)
        })
        .await
        .unwrap()
        .sale;
    assert_eq!(sale.voucher_number, "PB202608070001");

    let outcome = db
        .engine()
        .add_cash_for_silver(sale.id, Weight::from_grams(10), Money::from_rupees(95), None, ACTOR)
        .await
        .unwrap();

    assert_eq!(outcome.sale.balance_weight, Weight::from_grams(84));
    // ₹950 netted against the bill on this channel
    assert_eq!(
        outcome.sale.balance_cash,
        Money::from_paise(947_500) - Money::from_rupees(950)
    );
    assert_eq!(outcome.customer.balance_cash, outcome.sale.balance_cash);
    assert_eq!(outcome.entries.last().unwrap().cash_delta, -Money::from_rupees(950));
}

#[tokio::test]
async fn payment_against_missing_sale_is_not_found() {
    let db = test_db().await;
    customer_id(&db).await;

    let err = db
        .engine()
        .add_cash_payment(42, Money::from_rupees(10), None, ACTOR)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::NotFound { .. }));
}

#[tokio::test]
async fn non_positive_payment_is_invalid() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let sale = db.engine().create_sale(wholesale_request(cid)).await.unwrap().sale;

    let err = db
        .engine()
        .add_cash_payment(sale.id, Money::zero(), None, ACTOR)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidArgument(_)));
}

#[tokio::test]
async fn settlement_tolerances_absorb_rounding_residue() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let sale = db.engine().create_sale(wholesale_request(cid)).await.unwrap().sale;

    // Return all silver but 5mg, pay all cash but ₹1: both within tolerance
    let outcome = db
        .engine()
        .add_silver_payment(sale.id, Weight::from_milligrams(93_995), None, ACTOR)
        .await
        .unwrap();
    assert_eq!(outcome.sale.status, PaymentStatus::Partial);

    let outcome = db
        .engine()
        .add_cash_payment(sale.id, Money::from_paise(947_400), None, ACTOR)
        .await
        .unwrap();
    assert_eq!(outcome.sale.balance_weight, Weight::from_milligrams(5));
    assert_eq!(outcome.sale.balance_cash, Money::from_paise(100));
    assert_eq!(outcome.sale.status, PaymentStatus::Paid);
}

#[tokio::test]
async fn one_milligram_past_tolerance_stays_partial() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let sale = db.engine().create_sale(wholesale_request(cid)).await.unwrap().sale;

    db.engine()
        .add_cash_payment(sale.id, Money::from_paise(947_500), None, ACTOR)
        .await
        .unwrap();
    let outcome = db
        .engine()
        .add_silver_payment(sale.id, Weight::from_milligrams(93_994), None, ACTOR)
        .await
        .unwrap();

    assert_eq!(outcome.sale.balance_weight, Weight::from_milligrams(6));
    assert_eq!(outcome.sale.status, PaymentStatus::Partial);
}

// =============================================================================
// Silver Return (wholesale only)
// =============================================================================

#[tokio::test]
async fn silver_return_walks_pending_partial_completed() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let sale = db.engine().create_sale(wholesale_request(cid)).await.unwrap().sale;

    let outcome = db
        .engine()
        .add_silver_return(sale.id, Weight::from_grams(40), None, ACTOR)
        .await
        .unwrap();
    assert_eq!(outcome.sale.silver_returned, Weight::from_grams(40));
    assert_eq!(outcome.sale.silver_return_status, SilverReturnStatus::Partial);
    assert_eq!(outcome.customer.balance_weight, Weight::from_grams(54));

    let outcome = db
        .engine()
        .add_silver_return(sale.id, Weight::from_grams(54), None, ACTOR)
        .await
        .unwrap();
    assert_eq!(
        outcome.sale.silver_return_status,
        SilverReturnStatus::Completed
    );
    assert_eq!(outcome.sale.balance_weight, Weight::zero());
    assert_eq!(outcome.customer.balance_weight, Weight::zero());
}

#[tokio::test]
async fn silver_return_beyond_obligation_is_a_conflict() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let sale = db.engine().create_sale(wholesale_request(cid)).await.unwrap().sale;

    db.engine()
        .add_silver_return(sale.id, Weight::from_grams(90), None, ACTOR)
        .await
        .unwrap();

    let err = db
        .engine()
        .add_silver_return(sale.id, Weight::from_grams(5), None, ACTOR)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Conflict(_)));

    // The rejected return left no trace
    let outcome = db
        .engine()
        .add_silver_return(sale.id, Weight::from_grams(4), None, ACTOR)
        .await
        .unwrap();
    assert_eq!(outcome.sale.silver_returned, Weight::from_grams(94));
}

#[tokio::test]
async fn silver_return_outside_wholesale_is_invalid() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let sale = db
        .engine()
        .create_sale(CreateSaleRequest {
            channel: Channel::Product,
            ..wholesale_request(cid)
        })
        .await
        .unwrap()
        .sale;

    let err = db
        .engine()
        .add_silver_return(sale.id, Weight::from_grams(10), None, ACTOR)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidArgument(_)));
}

// =============================================================================
// Ledger Invariants
// =============================================================================

#[tokio::test]
async fn ledger_deltas_sum_to_the_customer_balances() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let engine = db.engine();

    let sale = engine.create_sale(wholesale_request(cid)).await.unwrap().sale;
    engine
        .add_cash_payment(sale.id, Money::from_rupees(1_000), None, ACTOR)
        .await
        .unwrap();
    engine
        .add_silver_payment(sale.id, Weight::from_grams(30), None, ACTOR)
        .await
        .unwrap();
    engine
        .add_cash_for_silver(sale.id, Weight::from_grams(10), Money::from_rupees(95), None, ACTOR)
        .await
        .unwrap();
    engine
        .add_adjustment(cid, Weight::from_milligrams(-250), Money::zero(), None, ACTOR)
        .await
        .unwrap();

    let entries = db.customers().ledger(cid).await.unwrap();
    let weight_sum: Weight = entries.iter().map(|e| e.weight_delta).sum();
    let cash_sum: Money = entries.iter().map(|e| e.cash_delta).sum();

    let customer = db.customers().get_by_id(cid).await.unwrap().unwrap();
    assert_eq!(weight_sum, customer.balance_weight);
    assert_eq!(cash_sum, customer.balance_cash);

    // weightAfter - weightBefore == silver - (paid + c4s + returned)
    let sale = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
    let credited = sale.paid_weight + sale.silver_returned;
    assert_eq!(
        customer.balance_weight - Weight::from_milligrams(-250),
        sale.total_silver_weight - credited
    );
}

#[tokio::test]
async fn closing_snapshot_is_never_retroactively_altered() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let engine = db.engine();

    let created = engine.create_sale(wholesale_request(cid)).await.unwrap();
    let frozen_weight = created.sale.closing_balance_weight;
    let frozen_cash = created.sale.closing_balance_cash;

    let after_payment = engine
        .add_cash_payment(created.sale.id, Money::from_rupees(5_000), None, ACTOR)
        .await
        .unwrap();

    assert_eq!(after_payment.sale.closing_balance_weight, frozen_weight);
    assert_eq!(after_payment.sale.closing_balance_cash, frozen_cash);
    // while the live balance moved on
    assert_ne!(after_payment.customer.balance_cash, frozen_cash);
}

#[tokio::test]
async fn delete_sale_restores_pre_sale_balances_exactly() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let engine = db.engine();

    // Give the customer some prior history so "restored" is not just zero
    engine
        .add_adjustment(cid, Weight::from_grams(7), Money::from_rupees(123), None, ACTOR)
        .await
        .unwrap();
    let before = db.customers().get_by_id(cid).await.unwrap().unwrap();

    let sale = engine.create_sale(wholesale_request(cid)).await.unwrap().sale;
    engine
        .add_cash_payment(sale.id, Money::from_rupees(1_000), None, ACTOR)
        .await
        .unwrap();
    engine
        .add_silver_return(sale.id, Weight::from_grams(94), None, ACTOR)
        .await
        .unwrap();

    engine.delete_sale(sale.id).await.unwrap();

    let after = db.customers().get_by_id(cid).await.unwrap().unwrap();
    assert_eq!(after.balance_weight, before.balance_weight);
    assert_eq!(after.balance_cash, before.balance_cash);

    // Every trace of the sale is gone
    assert!(db.sales().get_by_id(sale.id).await.unwrap().is_none());
    assert!(db.sales().entries(sale.id).await.unwrap().is_empty());
    assert!(db.sales().items(sale.id).await.unwrap().is_empty());
    // but unrelated history survives
    assert_eq!(db.customers().ledger(cid).await.unwrap().len(), 1);
}

#[tokio::test]
async fn customer_with_sales_cannot_be_deleted() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    db.engine().create_sale(wholesale_request(cid)).await.unwrap();

    let err = db.customers().delete(cid).await.unwrap_err();
    assert!(matches!(err, DbError::Conflict(_)));
}

// =============================================================================
// Inventory and Summaries
// =============================================================================

#[tokio::test]
async fn product_linked_line_decrements_stock_best_effort() {
    let db = test_db().await;
    let cid = customer_id(&db).await;

    let product = db
        .inventory()
        .create("kada stock", 10, Weight::from_grams(800), Weight::from_grams(780))
        .await
        .unwrap();

    let mut line = reference_line();
    line.product_id = Some(product.id);
    let mut req = wholesale_request(cid);
    req.lines = vec![line];
    db.engine().create_sale(req).await.unwrap();

    let product = db.inventory().get_by_id(product.id).await.unwrap().unwrap();
    assert_eq!(product.pieces, 8);
    assert_eq!(product.gross_weight, Weight::from_grams(650));
    assert_eq!(product.net_weight, Weight::from_grams(680));

    // Unknown product id: the sale still commits
    let mut line = reference_line();
    line.product_id = Some(9_999);
    let mut req = wholesale_request(cid);
    req.lines = vec![line];
    assert!(db.engine().create_sale(req).await.is_ok());
}

#[tokio::test]
async fn daily_summary_aggregates_one_channel_day() {
    let db = test_db().await;
    let cid = customer_id(&db).await;
    let engine = db.engine();

    let sale = engine.create_sale(wholesale_request(cid)).await.unwrap().sale;
    engine.create_sale(wholesale_request(cid)).await.unwrap();
    engine
        .add_cash_payment(sale.id, Money::from_rupees(1_000), None, ACTOR)
        .await
        .unwrap();
    // A different channel on the same day stays out of the sum
    engine
        .create_sale(CreateSaleRequest {
            channel: Channel::Product,
            ..wholesale_request(cid)
        })
        .await
        .unwrap();

    let summary = db
        .sales()
        .daily_summary(Channel::Wholesale, sale_day())
        .await
        .unwrap();

    assert_eq!(summary.sales_count, 2);
    assert_eq!(summary.total_silver_weight, Weight::from_grams(188));
    assert_eq!(summary.total_amount, Money::from_paise(2 * 947_500));
    assert_eq!(summary.paid_cash, Money::from_rupees(1_000));
}

// =============================================================================
// Voucher Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_sales_mint_distinct_sequential_vouchers() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::new(dir.path().join("argent.db")).max_connections(8);
    let db = Database::new(config).await.unwrap();
    let cid = customer_id(&db).await;

    const N: usize = 8;
    let mut handles = Vec::with_capacity(N);
    for _ in 0..N {
        let engine = db.engine();
        handles.push(tokio::spawn(async move {
            engine.create_sale(wholesale_request(cid)).await
        }));
    }

    let mut vouchers = Vec::with_capacity(N);
    for handle in handles {
        vouchers.push(handle.await.unwrap().unwrap().sale.voucher_number);
    }

    vouchers.sort();
    vouchers.dedup();
    assert_eq!(vouchers.len(), N, "voucher collision under concurrency");

    let expected: Vec<String> = (1..=N).map(|i| format!("20260807{i:04}")).collect();
    assert_eq!(vouchers, expected);
}
