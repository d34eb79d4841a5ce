//! Presentation generation: charge credits, get structured deck content from
//! the LLM, spread topic images across the slides, record history.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::credits;
use crate::errors::AppError;
use crate::generation::prompts;
use crate::history::{self, NewPresentation};
use crate::models::{PresentationContent, TeamMember};
use crate::render::theme::SlideTemplate;
use crate::state::AppState;

const MIN_SLIDES: usize = 5;
const MAX_SLIDES: usize = 20;
const DECK_IMAGE_COUNT: usize = 3;

#[derive(Debug, Deserialize)]
pub struct PresentationRequest {
    pub user_id: Uuid,
    pub team_members: Vec<TeamMember>,
    pub subject_name: String,
    pub professor_name: Option<String>,
    pub college_name: String,
    pub department_name: Option<String>,
    pub university_logo: Option<String>,
    pub topic: String,
    pub slides_count: usize,
    pub template: SlideTemplate,
    /// Skip image generation entirely when false.
    #[serde(default = "default_true")]
    pub with_images: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct PresentationResponse {
    pub content: PresentationContent,
    pub topic: String,
    pub template: SlideTemplate,
    pub credits_remaining: i64,
    pub history_id: Option<Uuid>,
}

fn validate(request: &PresentationRequest) -> Result<(), AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }
    if request.team_members.is_empty() {
        return Err(AppError::Validation(
            "at least one team member is required".to_string(),
        ));
    }
    if !(MIN_SLIDES..=MAX_SLIDES).contains(&request.slides_count) {
        return Err(AppError::Validation(format!(
            "slides_count must be between {MIN_SLIDES} and {MAX_SLIDES}"
        )));
    }
    Ok(())
}

/// Assigns `images` to evenly spaced slides, the same spread the document
/// planner uses for paragraph interleaving.
fn attach_images(content: &mut PresentationContent, images: Vec<String>) {
    let n = content.slides.len();
    let k = images.len();
    if n == 0 || k == 0 {
        return;
    }
    for (i, image) in images.into_iter().enumerate() {
        let position = (n * (i + 1) / (k + 1)).min(n - 1);
        content.slides[position].image_url = Some(image);
    }
}

pub async fn generate_presentation(
    state: &AppState,
    request: PresentationRequest,
) -> Result<PresentationResponse, AppError> {
    validate(&request)?;

    let credits_remaining =
        credits::charge_generation(&state.db, request.user_id, "Presentation generation").await?;

    let presenter = request
        .team_members
        .first()
        .map(|m| m.name.clone())
        .unwrap_or_else(|| "Student Team".to_string());
    let prompt = prompts::PRESENTATION_PROMPT_TEMPLATE
        .replace("{topic}", &request.topic)
        .replace("{slides_count}", &request.slides_count.to_string())
        .replace("{subject_name}", &request.subject_name)
        .replace("{student_name}", &presenter);

    let mut content: PresentationContent = state
        .llm
        .call_json(prompts::PRESENTATION_SYSTEM, &prompt)
        .await?;
    if content.slides.is_empty() {
        return Err(AppError::Llm(
            "Model returned a presentation with no slides".to_string(),
        ));
    }
    info!(topic = %request.topic, slides = content.slides.len(), "Presentation content generated");

    if request.with_images {
        let images = state
            .images
            .generate_topic_images(&request.topic, DECK_IMAGE_COUNT)
            .await;
        attach_images(&mut content, images);
    }

    let history_id = match serde_json::to_value(&content) {
        Ok(content_json) => {
            let first = &request.team_members[0];
            match history::save_presentation(
                &state.db,
                NewPresentation {
                    user_id: request.user_id,
                    student_name: &first.name,
                    student_id: &first.id,
                    subject_name: &request.subject_name,
                    professor_name: request.professor_name.as_deref(),
                    college_name: &request.college_name,
                    department_name: request.department_name.as_deref(),
                    university_logo: request.university_logo.as_deref(),
                    topic: &request.topic,
                    content: &content_json,
                    slides_count: content.slides.len() as i32,
                },
            )
            .await
            {
                Ok(id) => Some(id),
                Err(error) => {
                    warn!(%error, "Failed to save presentation history");
                    None
                }
            }
        }
        Err(error) => {
            warn!(%error, "Failed to serialize presentation content for history");
            None
        }
    };

    Ok(PresentationResponse {
        content,
        topic: request.topic,
        template: request.template,
        credits_remaining,
        history_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlideContent;

    fn content(n: usize) -> PresentationContent {
        PresentationContent {
            title: "T".to_string(),
            slides: (0..n)
                .map(|i| SlideContent {
                    title: format!("S{i}"),
                    points: vec![],
                    image_url: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_attach_images_spreads_evenly() {
        let mut deck = content(6);
        attach_images(
            &mut deck,
            vec!["a".to_string(), "b".to_string()],
        );
        let with_images: Vec<usize> = deck
            .slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.image_url.is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(with_images, vec![2, 4]);
    }

    #[test]
    fn test_attach_images_spreads_when_count_does_not_divide() {
        // 5 slides, 2 images → floor(5/3)=1 and floor(10/3)=3
        let mut deck = content(5);
        attach_images(&mut deck, vec!["a".to_string(), "b".to_string()]);
        let with_images: Vec<usize> = deck
            .slides
            .iter()
            .enumerate()
            .filter(|(_, s)| s.image_url.is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(with_images, vec![1, 3]);
    }

    #[test]
    fn test_attach_images_handles_more_images_than_slides() {
        let mut deck = content(2);
        attach_images(
            &mut deck,
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        // Positions clamp to the last slide rather than panicking.
        assert!(deck.slides.iter().any(|s| s.image_url.is_some()));
    }

    #[test]
    fn test_attach_images_noop_without_images() {
        let mut deck = content(4);
        attach_images(&mut deck, vec![]);
        assert!(deck.slides.iter().all(|s| s.image_url.is_none()));
    }
}
