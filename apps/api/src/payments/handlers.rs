//! Axum route handlers for the Payments API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::PaymentRequestRow;
use crate::payments;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitPaymentRequest {
    pub user_id: Uuid,
    pub user_email: String,
    pub transfer_number: String,
    #[serde(default)]
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewPaymentRequest {
    pub reviewed_by: Uuid,
    pub admin_notes: Option<String>,
    /// Approval only; defaults to the standard top-up.
    pub credits: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PaymentsResponse {
    pub payments: Vec<PaymentRequestRow>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/payments
pub async fn handle_submit_payment(
    State(state): State<AppState>,
    Json(request): Json<SubmitPaymentRequest>,
) -> Result<Json<PaymentRequestRow>, AppError> {
    if request.transfer_number.trim().is_empty() {
        return Err(AppError::Validation(
            "transfer_number cannot be empty".to_string(),
        ));
    }
    if request.user_email.trim().is_empty() {
        return Err(AppError::Validation(
            "user_email cannot be empty".to_string(),
        ));
    }

    let row = payments::submit(
        &state.db,
        request.user_id,
        request.user_email.trim(),
        request.transfer_number.trim(),
        request.amount,
    )
    .await?;
    Ok(Json(row))
}

/// GET /api/v1/payments?status=pending
pub async fn handle_list_payments(
    State(state): State<AppState>,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<Json<PaymentsResponse>, AppError> {
    if let Some(status) = query.status.as_deref() {
        if !matches!(status, "pending" | "approved" | "rejected") {
            return Err(AppError::Validation(format!(
                "Unknown payment status: {status}"
            )));
        }
    }

    let payments = payments::list(&state.db, query.status.as_deref()).await?;
    Ok(Json(PaymentsResponse { payments }))
}

/// POST /api/v1/payments/:id/approve
pub async fn handle_approve_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    Json(request): Json<ReviewPaymentRequest>,
) -> Result<Json<PaymentRequestRow>, AppError> {
    let credits_amount = request.credits.unwrap_or(payments::DEFAULT_TOPUP_CREDITS);
    if credits_amount <= 0 {
        return Err(AppError::Validation(
            "credits must be positive".to_string(),
        ));
    }

    let row = payments::approve(
        &state.db,
        payment_id,
        request.reviewed_by,
        request.admin_notes.as_deref(),
        credits_amount,
    )
    .await?;
    Ok(Json(row))
}

/// POST /api/v1/payments/:id/reject
pub async fn handle_reject_payment(
    State(state): State<AppState>,
    Path(payment_id): Path<Uuid>,
    Json(request): Json<ReviewPaymentRequest>,
) -> Result<Json<PaymentRequestRow>, AppError> {
    let row = payments::reject(
        &state.db,
        payment_id,
        request.reviewed_by,
        request.admin_notes.as_deref(),
    )
    .await?;
    Ok(Json(row))
}
