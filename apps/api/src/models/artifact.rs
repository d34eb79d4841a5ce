use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub subject_name: String,
    pub professor_name: String,
    pub college_name: String,
    pub department_name: String,
    pub university_logo: Option<String>,
    pub topic: String,
    pub content: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PresentationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub subject_name: String,
    pub professor_name: Option<String>,
    pub college_name: String,
    pub department_name: Option<String>,
    pub university_logo: Option<String>,
    pub topic: String,
    pub content: Value,
    pub slides_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExamRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub subject_name: String,
    pub content: String,
    pub question_count: i32,
    pub difficulty: String,
    pub questions: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuizRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub student_name: String,
    pub student_id: String,
    pub question_image: Option<String>,
    pub solution: String,
    pub created_at: DateTime<Utc>,
}

/// One slide of generated deck content. `image_url` is filled in after
/// generation when topic images are attached; only data URIs are embedded
/// by the PowerPoint renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideContent {
    pub title: String,
    pub points: Vec<String>,
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationContent {
    pub title: String,
    pub slides: Vec<SlideContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub id: String,
}

/// An exam question as produced by the model. `options` is absent for
/// true/false questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "type")]
    pub question_type: String,
    pub question: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}
