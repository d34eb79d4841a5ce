//! Credit ledger. A cached balance row per user plus an append-only
//! transaction log, kept consistent by doing every mutation inside a single
//! database transaction.
//!
//! Transaction amounts are stored positive; the sign lives in
//! `transaction_type` ('credit' adds, 'debit' subtracts). The balance
//! reconciles to `sum(credits) - sum(debits)` over the log.
//!
//! Accounts are created lazily: the first operation that touches a user
//! inserts the starting balance. The UNIQUE constraint on `user_id` makes
//! concurrent first touches converge on one row, and only the insert that
//! won records the welcome transaction.

pub mod handlers;

use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreditAccountRow, CreditTransactionRow};

pub const STARTING_CREDITS: i64 = 100;
pub const GENERATION_COST: i64 = 20;

const WELCOME_DESCRIPTION: &str = "Welcome bonus for new user";

/// Creates the user's account if it does not exist yet. Records the welcome
/// transaction only when this call actually created the row.
async fn ensure_account(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<(), sqlx::Error> {
    let created: Option<(i64,)> = sqlx::query_as(
        "INSERT INTO user_credits (user_id, credits) VALUES ($1, $2)
         ON CONFLICT (user_id) DO NOTHING
         RETURNING credits",
    )
    .bind(user_id)
    .bind(STARTING_CREDITS)
    .fetch_optional(&mut **tx)
    .await?;

    if created.is_some() {
        sqlx::query(
            "INSERT INTO credit_transactions (user_id, amount, transaction_type, description)
             VALUES ($1, $2, 'credit', $3)",
        )
        .bind(user_id)
        .bind(STARTING_CREDITS)
        .bind(WELCOME_DESCRIPTION)
        .execute(&mut **tx)
        .await?;
        info!(%user_id, "Initialized credit account with welcome bonus");
    }

    Ok(())
}

/// The full account row, initializing the account on first touch.
pub async fn get_account(pool: &PgPool, user_id: Uuid) -> Result<CreditAccountRow, AppError> {
    let mut tx = pool.begin().await?;
    ensure_account(&mut tx, user_id).await?;
    let account = sqlx::query_as::<_, CreditAccountRow>(
        "SELECT id, user_id, credits, created_at, updated_at
         FROM user_credits WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(account)
}

/// Current balance, initializing the account on first touch.
pub async fn get_balance(pool: &PgPool, user_id: Uuid) -> Result<i64, AppError> {
    Ok(get_account(pool, user_id).await?.credits)
}

/// Atomically deducts `amount` if the balance covers it. Returns the new
/// balance, or None when funds are insufficient (in which case nothing was
/// written).
pub async fn debit(
    pool: &PgPool,
    user_id: Uuid,
    amount: i64,
    description: &str,
) -> Result<Option<i64>, AppError> {
    let mut tx = pool.begin().await?;
    ensure_account(&mut tx, user_id).await?;

    // The balance guard lives in the WHERE clause so two concurrent debits
    // can never both succeed against the same credits.
    let updated: Option<(i64,)> = sqlx::query_as(
        "UPDATE user_credits
         SET credits = credits - $2, updated_at = now()
         WHERE user_id = $1 AND credits >= $2
         RETURNING credits",
    )
    .bind(user_id)
    .bind(amount)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((balance,)) = updated else {
        tx.rollback().await?;
        return Ok(None);
    };

    sqlx::query(
        "INSERT INTO credit_transactions (user_id, amount, transaction_type, description)
         VALUES ($1, $2, 'debit', $3)",
    )
    .bind(user_id)
    .bind(amount)
    .bind(description)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    info!(%user_id, amount, balance, "Debited credits");
    Ok(Some(balance))
}

/// Debits the generation fee or fails with 402.
pub async fn charge_generation(
    pool: &PgPool,
    user_id: Uuid,
    description: &str,
) -> Result<i64, AppError> {
    match debit(pool, user_id, GENERATION_COST, description).await? {
        Some(balance) => Ok(balance),
        None => {
            let balance = get_balance(pool, user_id).await?;
            Err(AppError::InsufficientCredits {
                balance,
                required: GENERATION_COST,
            })
        }
    }
}

/// Adds credits inside an existing transaction. Used by payment approval so
/// the top-up and the request's status flip commit together.
pub async fn credit_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    amount: i64,
    description: &str,
) -> Result<i64, sqlx::Error> {
    ensure_account(tx, user_id).await?;

    let (balance,): (i64,) = sqlx::query_as(
        "UPDATE user_credits
         SET credits = credits + $2, updated_at = now()
         WHERE user_id = $1
         RETURNING credits",
    )
    .bind(user_id)
    .bind(amount)
    .fetch_one(&mut **tx)
    .await?;

    sqlx::query(
        "INSERT INTO credit_transactions (user_id, amount, transaction_type, description)
         VALUES ($1, $2, 'credit', $3)",
    )
    .bind(user_id)
    .bind(amount)
    .bind(description)
    .execute(&mut **tx)
    .await?;

    Ok(balance)
}

/// Transaction log, newest first.
pub async fn list_transactions(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<CreditTransactionRow>, AppError> {
    let rows = sqlx::query_as::<_, CreditTransactionRow>(
        "SELECT id, user_id, amount, transaction_type, description, created_at
         FROM credit_transactions
         WHERE user_id = $1
         ORDER BY created_at DESC
         LIMIT $2",
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
