//! Quiz solving: charge credits, send the uploaded question image to the
//! multimodal model, record the solution.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::credits;
use crate::errors::AppError;
use crate::generation::prompts;
use crate::history::{self, NewQuiz};
use crate::llm_client::Part;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub user_id: Uuid,
    pub student_name: String,
    pub student_id: String,
    /// Data URI of the uploaded question sheet.
    pub image: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub solution: String,
    pub credits_remaining: i64,
    pub history_id: Option<Uuid>,
}

pub async fn solve_quiz(state: &AppState, request: QuizRequest) -> Result<QuizResponse, AppError> {
    let Some(image_part) = Part::from_data_uri(&request.image) else {
        return Err(AppError::Validation(
            "image must be a base64 data URI".to_string(),
        ));
    };

    let credits_remaining =
        credits::charge_generation(&state.db, request.user_id, "Quiz solving").await?;

    let text = format!(
        "{}\n\n{}",
        prompts::QUIZ_SOLVE_SYSTEM,
        prompts::QUIZ_SOLVE_PROMPT
    );
    let solution = state.llm.call(vec![Part::text(text), image_part]).await?;
    info!(
        file = request.file_name.as_deref().unwrap_or("unnamed"),
        chars = solution.len(),
        "Quiz solved"
    );

    let history_id = match history::save_quiz(
        &state.db,
        NewQuiz {
            user_id: request.user_id,
            student_name: &request.student_name,
            student_id: &request.student_id,
            question_image: request.file_name.as_deref(),
            solution: &solution,
        },
    )
    .await
    {
        Ok(id) => Some(id),
        Err(error) => {
            warn!(%error, "Failed to save quiz history");
            None
        }
    };

    Ok(QuizResponse {
        solution,
        credits_remaining,
        history_id,
    })
}
