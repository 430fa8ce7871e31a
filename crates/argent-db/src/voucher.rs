//! # Voucher Sequencer
//!
//! Produces the human-readable sale identifier: `PREFIX + YYYYMMDD + NNNN`,
//! where the four-digit sequence restarts at `0001` on the first sale of
//! each calendar day per channel.
//!
//! ```text
//! REG202608070001   regular channel, 2026-08-07, first sale of the day
//! 202608070012      wholesale (empty prefix), twelfth sale
//! PB202608070003    product billing
//! ```
//!
//! ## Concurrency
//! "Read the highest voucher, add one" races under concurrent writers: two
//! transactions read the same maximum and mint the same number. The sequence
//! lives in a `voucher_counters (channel, day, last_seq)` row instead, bumped
//! by a single `INSERT .. ON CONFLICT .. DO UPDATE .. RETURNING` statement.
//! The statement is issued first in the sale transaction, which also acquires
//! the database write lock up front (see [`crate::engine`]).
//!
//! The business date is an explicit parameter. The sequencer never consults
//! a clock.

use chrono::NaiveDate;
use sqlx::{Sqlite, Transaction};

use argent_core::ChannelPolicy;

use crate::error::{DbError, DbResult};

/// Highest sequence the four-digit suffix can carry.
const MAX_SEQ: i64 = 9_999;

/// Allocates the next voucher number for `(channel, day)`.
///
/// Must be called inside the sale's transaction; the counter bump commits or
/// rolls back with the rest of the unit of work, so aborted sales do not
/// leave holes.
pub async fn next_voucher(
    tx: &mut Transaction<'_, Sqlite>,
    policy: &ChannelPolicy,
    day: NaiveDate,
) -> DbResult<String> {
    let day_key = day.format("%Y-%m-%d").to_string();

    let seq: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO voucher_counters (channel, day, last_seq)
        VALUES (?1, ?2, 1)
        ON CONFLICT (channel, day) DO UPDATE SET last_seq = last_seq + 1
        RETURNING last_seq
        "#,
    )
    .bind(policy.channel.as_str())
    .bind(&day_key)
    .fetch_one(&mut **tx)
    .await?;

    if seq > MAX_SEQ {
        return Err(DbError::conflict(format!(
            "voucher sequence exhausted for {} on {}",
            policy.channel, day_key
        )));
    }

    Ok(format!(
        "{}{}{:04}",
        policy.voucher_prefix,
        day.format("%Y%m%d"),
        seq
    ))
}
