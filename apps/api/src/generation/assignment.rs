//! Assignment generation: charge credits, draft the document body with the
//! LLM, attach topic images, record history.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::credits;
use crate::errors::AppError;
use crate::generation::prompts;
use crate::history::{self, NewAssignment};
use crate::state::AppState;

const WORDS_PER_PAGE: usize = 300;
const MIN_PAGES: usize = 1;
const MAX_PAGES: usize = 20;

#[derive(Debug, Deserialize)]
pub struct AssignmentRequest {
    pub user_id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub subject_name: String,
    pub professor_name: String,
    pub college_name: String,
    pub department_name: String,
    pub university_logo: Option<String>,
    pub topic: String,
    pub page_count: usize,
}

#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub content: String,
    pub images: Vec<String>,
    pub topic: String,
    pub credits_remaining: i64,
    pub history_id: Option<Uuid>,
}

fn validate(request: &AssignmentRequest) -> Result<(), AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }
    if request.student_name.trim().is_empty() {
        return Err(AppError::Validation(
            "student_name cannot be empty".to_string(),
        ));
    }
    if !(MIN_PAGES..=MAX_PAGES).contains(&request.page_count) {
        return Err(AppError::Validation(format!(
            "page_count must be between {MIN_PAGES} and {MAX_PAGES}"
        )));
    }
    Ok(())
}

/// Longer documents get one extra image; the image client applies its own
/// hard cap.
fn image_count_for(page_count: usize) -> usize {
    if page_count >= 6 {
        4
    } else {
        3
    }
}

pub async fn generate_assignment(
    state: &AppState,
    request: AssignmentRequest,
) -> Result<AssignmentResponse, AppError> {
    validate(&request)?;

    let credits_remaining =
        credits::charge_generation(&state.db, request.user_id, "Assignment generation").await?;

    let word_count = request.page_count * WORDS_PER_PAGE;
    let system = prompts::ASSIGNMENT_SYSTEM_TEMPLATE
        .replace("{word_count}", &word_count.to_string())
        .replace("{page_count}", &request.page_count.to_string());
    let prompt = prompts::ASSIGNMENT_PROMPT_TEMPLATE
        .replace("{topic}", &request.topic)
        .replace("{student_name}", &request.student_name)
        .replace("{student_id}", &request.student_id)
        .replace("{subject_name}", &request.subject_name)
        .replace("{professor_name}", &request.professor_name)
        .replace("{word_count}", &word_count.to_string())
        .replace("{page_count}", &request.page_count.to_string());

    let content = state.llm.call_text(&system, &prompt).await?;
    info!(topic = %request.topic, chars = content.len(), "Assignment content generated");

    // Images never fail the request; the document stands without them.
    let images = state
        .images
        .generate_topic_images(&request.topic, image_count_for(request.page_count))
        .await;

    // History is best effort too; the user already paid and has the content.
    let history_id = match history::save_assignment(
        &state.db,
        NewAssignment {
            user_id: request.user_id,
            student_name: &request.student_name,
            student_id: &request.student_id,
            subject_name: &request.subject_name,
            professor_name: &request.professor_name,
            college_name: &request.college_name,
            department_name: &request.department_name,
            university_logo: request.university_logo.as_deref(),
            topic: &request.topic,
            content: &content,
            images: &images,
        },
    )
    .await
    {
        Ok(id) => Some(id),
        Err(error) => {
            warn!(%error, "Failed to save assignment history");
            None
        }
    };

    Ok(AssignmentResponse {
        content,
        images,
        topic: request.topic,
        credits_remaining,
        history_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(topic: &str, page_count: usize) -> AssignmentRequest {
        AssignmentRequest {
            user_id: Uuid::nil(),
            student_name: "Lena".to_string(),
            student_id: "9".to_string(),
            subject_name: "Biology".to_string(),
            professor_name: "Dr. Moss".to_string(),
            college_name: "State".to_string(),
            department_name: "Science".to_string(),
            university_logo: None,
            topic: topic.to_string(),
            page_count,
        }
    }

    #[test]
    fn test_validate_rejects_empty_topic() {
        assert!(validate(&request("  ", 3)).is_err());
        assert!(validate(&request("Cells", 3)).is_ok());
    }

    #[test]
    fn test_validate_rejects_page_count_out_of_range() {
        assert!(validate(&request("Cells", 0)).is_err());
        assert!(validate(&request("Cells", 21)).is_err());
        assert!(validate(&request("Cells", 20)).is_ok());
    }

    #[test]
    fn test_image_count_scales_with_length() {
        assert_eq!(image_count_for(5), 3);
        assert_eq!(image_count_for(6), 4);
        assert_eq!(image_count_for(12), 4);
    }
}
