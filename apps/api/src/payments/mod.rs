//! Manual payment review. Users submit a transfer reference, admins approve
//! or reject it. Both outcomes are terminal; approval tops up the ledger in
//! the same database transaction that flips the request's status.

pub mod handlers;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::credits;
use crate::errors::AppError;
use crate::models::PaymentRequestRow;

/// Credits granted per approved payment when the reviewer does not override.
pub const DEFAULT_TOPUP_CREDITS: i64 = 1000;

const ROW_COLUMNS: &str = "id, user_id, user_email, transfer_number, amount, status, \
                           admin_notes, reviewed_by, reviewed_at, created_at";

pub async fn submit(
    pool: &PgPool,
    user_id: Uuid,
    user_email: &str,
    transfer_number: &str,
    amount: i64,
) -> Result<PaymentRequestRow, AppError> {
    let row = sqlx::query_as::<_, PaymentRequestRow>(&format!(
        "INSERT INTO payment_requests (user_id, user_email, transfer_number, amount)
         VALUES ($1, $2, $3, $4)
         RETURNING {ROW_COLUMNS}"
    ))
    .bind(user_id)
    .bind(user_email)
    .bind(transfer_number)
    .bind(amount)
    .fetch_one(pool)
    .await?;

    info!(payment_id = %row.id, %user_id, "Payment request submitted");
    Ok(row)
}

/// All requests, optionally filtered by status, newest first.
pub async fn list(pool: &PgPool, status: Option<&str>) -> Result<Vec<PaymentRequestRow>, AppError> {
    let rows = match status {
        Some(status) => {
            sqlx::query_as::<_, PaymentRequestRow>(&format!(
                "SELECT {ROW_COLUMNS} FROM payment_requests
                 WHERE status = $1 ORDER BY created_at DESC"
            ))
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, PaymentRequestRow>(&format!(
                "SELECT {ROW_COLUMNS} FROM payment_requests ORDER BY created_at DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

/// Approves a pending request and credits the user atomically. Fails with
/// 409 when the request was already reviewed, 404 when it does not exist.
pub async fn approve(
    pool: &PgPool,
    payment_id: Uuid,
    reviewed_by: Uuid,
    admin_notes: Option<&str>,
    credits_amount: i64,
) -> Result<PaymentRequestRow, AppError> {
    let mut tx = pool.begin().await?;

    // The status guard in the WHERE clause is what makes review terminal:
    // a second approve (or a reject racing an approve) matches zero rows.
    let updated: Option<(Uuid,)> = sqlx::query_as(
        "UPDATE payment_requests
         SET status = 'approved', reviewed_by = $2, reviewed_at = now(), admin_notes = $3
         WHERE id = $1 AND status = 'pending'
         RETURNING user_id",
    )
    .bind(payment_id)
    .bind(reviewed_by)
    .bind(admin_notes)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((user_id,)) = updated else {
        tx.rollback().await?;
        return Err(already_reviewed(pool, payment_id).await?);
    };

    let description = format!("Payment approved: +{credits_amount} credits");
    let balance = credits::credit_in_tx(&mut tx, user_id, credits_amount, &description).await?;

    let row = fetch_in_tx(&mut tx, payment_id).await?;
    tx.commit().await?;

    info!(%payment_id, %user_id, credits_amount, balance, "Payment approved");
    Ok(row)
}

/// Rejects a pending request. No ledger writes.
pub async fn reject(
    pool: &PgPool,
    payment_id: Uuid,
    reviewed_by: Uuid,
    admin_notes: Option<&str>,
) -> Result<PaymentRequestRow, AppError> {
    let mut tx = pool.begin().await?;

    let updated: Option<(Uuid,)> = sqlx::query_as(
        "UPDATE payment_requests
         SET status = 'rejected', reviewed_by = $2, reviewed_at = now(), admin_notes = $3
         WHERE id = $1 AND status = 'pending'
         RETURNING user_id",
    )
    .bind(payment_id)
    .bind(reviewed_by)
    .bind(admin_notes)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_none() {
        tx.rollback().await?;
        return Err(already_reviewed(pool, payment_id).await?);
    }

    let row = fetch_in_tx(&mut tx, payment_id).await?;
    tx.commit().await?;

    info!(%payment_id, "Payment rejected");
    Ok(row)
}

async fn fetch_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    payment_id: Uuid,
) -> Result<PaymentRequestRow, sqlx::Error> {
    sqlx::query_as::<_, PaymentRequestRow>(&format!(
        "SELECT {ROW_COLUMNS} FROM payment_requests WHERE id = $1"
    ))
    .bind(payment_id)
    .fetch_one(&mut **tx)
    .await
}

/// Distinguishes "no such request" from "already reviewed" for the error
/// returned when the status guard matches nothing.
async fn already_reviewed(pool: &PgPool, payment_id: Uuid) -> Result<AppError, AppError> {
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT status FROM payment_requests WHERE id = $1")
            .bind(payment_id)
            .fetch_optional(pool)
            .await?;

    Ok(match existing {
        Some((status,)) => AppError::Conflict(format!(
            "Payment request {payment_id} has already been {status}"
        )),
        None => AppError::NotFound(format!("Payment request {payment_id} not found")),
    })
}
