pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::credits::handlers as credit_handlers;
use crate::generation::handlers as generation_handlers;
use crate::history::handlers as history_handlers;
use crate::payments::handlers as payment_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API (metered)
        .route(
            "/api/v1/assignments",
            post(generation_handlers::handle_generate_assignment),
        )
        .route(
            "/api/v1/presentations",
            post(generation_handlers::handle_generate_presentation),
        )
        .route(
            "/api/v1/exams",
            post(generation_handlers::handle_generate_exam),
        )
        .route(
            "/api/v1/quizzes/solve",
            post(generation_handlers::handle_solve_quiz),
        )
        // Export API (free, retryable)
        .route(
            "/api/v1/assignments/export/docx",
            post(generation_handlers::handle_export_assignment_docx),
        )
        .route(
            "/api/v1/assignments/export/pdf",
            post(generation_handlers::handle_export_assignment_pdf),
        )
        .route(
            "/api/v1/presentations/export",
            post(generation_handlers::handle_export_presentation),
        )
        // Credits API
        .route(
            "/api/v1/credits/:user_id",
            get(credit_handlers::handle_get_balance),
        )
        .route(
            "/api/v1/credits/:user_id/transactions",
            get(credit_handlers::handle_list_transactions),
        )
        // Payments API
        .route(
            "/api/v1/payments",
            post(payment_handlers::handle_submit_payment)
                .get(payment_handlers::handle_list_payments),
        )
        .route(
            "/api/v1/payments/:id/approve",
            post(payment_handlers::handle_approve_payment),
        )
        .route(
            "/api/v1/payments/:id/reject",
            post(payment_handlers::handle_reject_payment),
        )
        // History API
        .route(
            "/api/v1/history/assignments",
            get(history_handlers::handle_list_assignments),
        )
        .route(
            "/api/v1/history/assignments/:id",
            delete(history_handlers::handle_delete_assignment),
        )
        .route(
            "/api/v1/history/presentations",
            get(history_handlers::handle_list_presentations),
        )
        .route(
            "/api/v1/history/presentations/:id",
            delete(history_handlers::handle_delete_presentation),
        )
        .route(
            "/api/v1/history/exams",
            get(history_handlers::handle_list_exams),
        )
        .route(
            "/api/v1/history/exams/:id",
            delete(history_handlers::handle_delete_exam),
        )
        .route(
            "/api/v1/history/quizzes",
            get(history_handlers::handle_list_quizzes),
        )
        .route(
            "/api/v1/history/quizzes/:id",
            delete(history_handlers::handle_delete_quiz),
        )
        .with_state(state)
}
