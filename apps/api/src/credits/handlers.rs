//! Axum route handlers for the Credits API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::credits;
use crate::errors::AppError;
use crate::models::{CreditAccountRow, CreditTransactionRow};
use crate::state::AppState;

const DEFAULT_TRANSACTION_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<CreditTransactionRow>,
}

/// GET /api/v1/credits/:user_id
///
/// Returns the user's account, creating it on first touch.
pub async fn handle_get_balance(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<CreditAccountRow>, AppError> {
    let account = credits::get_account(&state.db, user_id).await?;
    Ok(Json(account))
}

/// GET /api/v1/credits/:user_id/transactions
pub async fn handle_list_transactions(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_TRANSACTION_LIMIT).clamp(1, 100);
    let transactions = credits::list_transactions(&state.db, user_id, limit).await?;
    Ok(Json(TransactionsResponse { transactions }))
}
