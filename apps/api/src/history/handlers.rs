//! Axum route handlers for the History API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::history::{self, HistoryTable};
use crate::models::{AssignmentRow, ExamRow, PresentationRow, QuizRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/history/assignments?user_id=...
pub async fn handle_list_assignments(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<AssignmentRow>>, AppError> {
    Ok(Json(history::list_assignments(&state.db, query.user_id).await?))
}

/// GET /api/v1/history/presentations?user_id=...
pub async fn handle_list_presentations(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<PresentationRow>>, AppError> {
    Ok(Json(history::list_presentations(&state.db, query.user_id).await?))
}

/// GET /api/v1/history/exams?user_id=...
pub async fn handle_list_exams(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<ExamRow>>, AppError> {
    Ok(Json(history::list_exams(&state.db, query.user_id).await?))
}

/// GET /api/v1/history/quizzes?user_id=...
pub async fn handle_list_quizzes(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<QuizRow>>, AppError> {
    Ok(Json(history::list_quizzes(&state.db, query.user_id).await?))
}

/// DELETE /api/v1/history/assignments/:id?user_id=...
pub async fn handle_delete_assignment(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    Query(query): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    history::delete_record(&state.db, HistoryTable::Assignment, record_id, query.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/history/presentations/:id?user_id=...
pub async fn handle_delete_presentation(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    Query(query): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    history::delete_record(&state.db, HistoryTable::Presentation, record_id, query.user_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/history/exams/:id?user_id=...
pub async fn handle_delete_exam(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    Query(query): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    history::delete_record(&state.db, HistoryTable::Exam, record_id, query.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/history/quizzes/:id?user_id=...
pub async fn handle_delete_quiz(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
    Query(query): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    history::delete_record(&state.db, HistoryTable::Quiz, record_id, query.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
