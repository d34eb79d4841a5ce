//! Exam generation: charge credits, turn study material into structured
//! questions, record history.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::credits;
use crate::errors::AppError;
use crate::generation::prompts;
use crate::history::{self, NewExam};
use crate::models::Question;
use crate::state::AppState;

const MIN_QUESTIONS: usize = 1;
const MAX_QUESTIONS: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ExamRequest {
    pub user_id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub subject_name: Option<String>,
    /// Study material the questions are drawn from.
    pub content: String,
    pub question_count: usize,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_question_type")]
    pub question_type: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

fn default_question_type() -> String {
    "mcq".to_string()
}

#[derive(Debug, Serialize)]
pub struct ExamResponse {
    pub questions: Vec<Question>,
    pub difficulty: String,
    pub question_type: String,
    pub credits_remaining: i64,
    pub history_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct QuestionList {
    questions: Vec<Question>,
}

fn validate(request: &ExamRequest) -> Result<(), AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&request.question_count) {
        return Err(AppError::Validation(format!(
            "question_count must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}"
        )));
    }
    if !matches!(request.difficulty.as_str(), "easy" | "medium" | "hard") {
        return Err(AppError::Validation(format!(
            "Unknown difficulty: {}",
            request.difficulty
        )));
    }
    if !matches!(request.question_type.as_str(), "mcq" | "truefalse" | "mix") {
        return Err(AppError::Validation(format!(
            "Unknown question_type: {}",
            request.question_type
        )));
    }
    Ok(())
}

fn type_label(question_type: &str) -> &str {
    if question_type == "mix" {
        "mixed type"
    } else {
        question_type
    }
}

pub async fn generate_exam(
    state: &AppState,
    request: ExamRequest,
) -> Result<ExamResponse, AppError> {
    validate(&request)?;

    let credits_remaining =
        credits::charge_generation(&state.db, request.user_id, "Exam generation").await?;

    let subject = request.subject_name.as_deref().unwrap_or("General");
    let system = prompts::EXAM_SYSTEM_TEMPLATE
        .replace("{question_count}", &request.question_count.to_string())
        .replace("{difficulty}", &request.difficulty.to_uppercase())
        .replace(
            "{difficulty_guide}",
            prompts::difficulty_guide(&request.difficulty),
        )
        .replace("{question_type}", &request.question_type.to_uppercase())
        .replace("{type_guide}", prompts::type_guide(&request.question_type));
    let prompt = prompts::EXAM_PROMPT_TEMPLATE
        .replace("{subject_name}", subject)
        .replace("{content}", &request.content)
        .replace("{question_count}", &request.question_count.to_string())
        .replace("{difficulty}", &request.difficulty)
        .replace("{type_label}", type_label(&request.question_type));

    let list: QuestionList = state.llm.call_json(&system, &prompt).await?;
    if list.questions.is_empty() {
        return Err(AppError::Llm("Model returned no questions".to_string()));
    }
    info!(
        count = list.questions.len(),
        difficulty = %request.difficulty,
        "Exam questions generated"
    );

    let history_id = match serde_json::to_value(&list.questions) {
        Ok(questions_json) => {
            match history::save_exam(
                &state.db,
                NewExam {
                    user_id: request.user_id,
                    student_name: &request.student_name,
                    student_id: &request.student_id,
                    subject_name: subject,
                    content: &request.content,
                    question_count: list.questions.len() as i32,
                    difficulty: &request.difficulty,
                    questions: &questions_json,
                },
            )
            .await
            {
                Ok(id) => Some(id),
                Err(error) => {
                    warn!(%error, "Failed to save exam history");
                    None
                }
            }
        }
        Err(error) => {
            warn!(%error, "Failed to serialize exam questions for history");
            None
        }
    };

    Ok(ExamResponse {
        questions: list.questions,
        difficulty: request.difficulty,
        question_type: request.question_type,
        credits_remaining,
        history_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(difficulty: &str, question_type: &str, count: usize) -> ExamRequest {
        ExamRequest {
            user_id: Uuid::nil(),
            student_name: "Ira".to_string(),
            student_id: "4".to_string(),
            subject_name: None,
            content: "Photosynthesis converts light into chemical energy.".to_string(),
            question_count: count,
            difficulty: difficulty.to_string(),
            question_type: question_type.to_string(),
        }
    }

    #[test]
    fn test_validate_bounds_and_enums() {
        assert!(validate(&request("medium", "mcq", 10)).is_ok());
        assert!(validate(&request("medium", "mcq", 0)).is_err());
        assert!(validate(&request("medium", "mcq", 51)).is_err());
        assert!(validate(&request("extreme", "mcq", 10)).is_err());
        assert!(validate(&request("medium", "essay", 10)).is_err());
    }

    #[test]
    fn test_type_label_expands_mix() {
        assert_eq!(type_label("mix"), "mixed type");
        assert_eq!(type_label("mcq"), "mcq");
    }

    #[test]
    fn test_question_list_parses_model_shape() {
        let json = r#"{"questions":[{"id":1,"type":"mcq","question":"Q?",
            "options":["A. x","B. y","C. z","D. w"],"correctAnswer":"A",
            "explanation":"because"}]}"#;
        let list: QuestionList = serde_json::from_str(json).unwrap();
        assert_eq!(list.questions.len(), 1);
        assert_eq!(list.questions[0].correct_answer, "A");
        assert_eq!(list.questions[0].question_type, "mcq");
    }

    #[test]
    fn test_question_parses_null_options() {
        let json = r#"{"questions":[{"id":2,"type":"truefalse","question":"Q?",
            "options":null,"correctAnswer":"True","explanation":""}]}"#;
        let list: QuestionList = serde_json::from_str(json).unwrap();
        assert!(list.questions[0].options.is_none());
    }
}
