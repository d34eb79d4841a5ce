//! Axum route handlers for the Generation and Export APIs.
//!
//! Generation endpoints are metered; export endpoints are free so a failed
//! download can be retried without touching the ledger.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::compose::{interleave, segment};
use crate::errors::AppError;
use crate::generation::assignment::{generate_assignment, AssignmentRequest, AssignmentResponse};
use crate::generation::exam::{generate_exam, ExamRequest, ExamResponse};
use crate::generation::presentation::{
    generate_presentation, PresentationRequest, PresentationResponse,
};
use crate::generation::quiz::{solve_quiz, QuizRequest, QuizResponse};
use crate::models::PresentationContent;
use crate::render::pptx::DeckMeta;
use crate::render::{docx, pdf, pptx, DocumentMeta, RenderedDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types (export)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExportDocxRequest {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub content: String,
    #[serde(default)]
    pub has_images: bool,
}

#[derive(Debug, Deserialize)]
pub struct ExportPdfRequest {
    #[serde(flatten)]
    pub meta: DocumentMeta,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExportPptxRequest {
    #[serde(flatten)]
    pub meta: DeckMeta,
    pub content: PresentationContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assignments
pub async fn handle_generate_assignment(
    State(state): State<AppState>,
    Json(request): Json<AssignmentRequest>,
) -> Result<Json<AssignmentResponse>, AppError> {
    Ok(Json(generate_assignment(&state, request).await?))
}

/// POST /api/v1/presentations
pub async fn handle_generate_presentation(
    State(state): State<AppState>,
    Json(request): Json<PresentationRequest>,
) -> Result<Json<PresentationResponse>, AppError> {
    Ok(Json(generate_presentation(&state, request).await?))
}

/// POST /api/v1/exams
pub async fn handle_generate_exam(
    State(state): State<AppState>,
    Json(request): Json<ExamRequest>,
) -> Result<Json<ExamResponse>, AppError> {
    Ok(Json(generate_exam(&state, request).await?))
}

/// POST /api/v1/quizzes/solve
pub async fn handle_solve_quiz(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    Ok(Json(solve_quiz(&state, request).await?))
}

// ────────────────────────────────────────────────────────────────────────────
// Export handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assignments/export/docx
pub async fn handle_export_assignment_docx(
    Json(request): Json<ExportDocxRequest>,
) -> Result<RenderedDocument, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let blocks = segment(&request.content);
    docx::render(&request.meta, &blocks, request.has_images)
}

/// POST /api/v1/assignments/export/pdf
pub async fn handle_export_assignment_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportPdfRequest>,
) -> Result<RenderedDocument, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let blocks = segment(&request.content);
    let units = interleave(blocks, &request.images, &request.meta.topic);
    pdf::render(&state.rasterizer, &request.meta, &units).await
}

/// POST /api/v1/presentations/export
pub async fn handle_export_presentation(
    Json(request): Json<ExportPptxRequest>,
) -> Result<RenderedDocument, AppError> {
    if request.content.slides.is_empty() {
        return Err(AppError::Validation(
            "presentation has no slides".to_string(),
        ));
    }

    pptx::render(&request.meta, &request.content)
}
