//! Artifact history. One table per artifact kind, append-and-delete only:
//! records are never updated after insert, and deletes are scoped to the
//! owning user so one user can never remove another's rows.

pub mod handlers;

use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AssignmentRow, ExamRow, PresentationRow, QuizRow};

pub struct NewAssignment<'a> {
    pub user_id: Uuid,
    pub student_name: &'a str,
    pub student_id: &'a str,
    pub subject_name: &'a str,
    pub professor_name: &'a str,
    pub college_name: &'a str,
    pub department_name: &'a str,
    pub university_logo: Option<&'a str>,
    pub topic: &'a str,
    pub content: &'a str,
    pub images: &'a [String],
}

pub struct NewPresentation<'a> {
    pub user_id: Uuid,
    pub student_name: &'a str,
    pub student_id: &'a str,
    pub subject_name: &'a str,
    pub professor_name: Option<&'a str>,
    pub college_name: &'a str,
    pub department_name: Option<&'a str>,
    pub university_logo: Option<&'a str>,
    pub topic: &'a str,
    pub content: &'a Value,
    pub slides_count: i32,
}

pub struct NewExam<'a> {
    pub user_id: Uuid,
    pub student_name: &'a str,
    pub student_id: &'a str,
    pub subject_name: &'a str,
    pub content: &'a str,
    pub question_count: i32,
    pub difficulty: &'a str,
    pub questions: &'a Value,
}

pub struct NewQuiz<'a> {
    pub user_id: Uuid,
    pub student_name: &'a str,
    pub student_id: &'a str,
    pub question_image: Option<&'a str>,
    pub solution: &'a str,
}

// ────────────────────────────────────────────────────────────────────────────
// Saves
// ────────────────────────────────────────────────────────────────────────────

pub async fn save_assignment(pool: &PgPool, new: NewAssignment<'_>) -> Result<Uuid, AppError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO assignment_history
         (user_id, student_name, student_id, subject_name, professor_name,
          college_name, department_name, university_logo, topic, content, images)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING id",
    )
    .bind(new.user_id)
    .bind(new.student_name)
    .bind(new.student_id)
    .bind(new.subject_name)
    .bind(new.professor_name)
    .bind(new.college_name)
    .bind(new.department_name)
    .bind(new.university_logo)
    .bind(new.topic)
    .bind(new.content)
    .bind(new.images)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn save_presentation(pool: &PgPool, new: NewPresentation<'_>) -> Result<Uuid, AppError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO presentation_history
         (user_id, student_name, student_id, subject_name, professor_name,
          college_name, department_name, university_logo, topic, content, slides_count)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
         RETURNING id",
    )
    .bind(new.user_id)
    .bind(new.student_name)
    .bind(new.student_id)
    .bind(new.subject_name)
    .bind(new.professor_name)
    .bind(new.college_name)
    .bind(new.department_name)
    .bind(new.university_logo)
    .bind(new.topic)
    .bind(new.content)
    .bind(new.slides_count)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn save_exam(pool: &PgPool, new: NewExam<'_>) -> Result<Uuid, AppError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO exam_history
         (user_id, student_name, student_id, subject_name, content,
          question_count, difficulty, questions)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING id",
    )
    .bind(new.user_id)
    .bind(new.student_name)
    .bind(new.student_id)
    .bind(new.subject_name)
    .bind(new.content)
    .bind(new.question_count)
    .bind(new.difficulty)
    .bind(new.questions)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn save_quiz(pool: &PgPool, new: NewQuiz<'_>) -> Result<Uuid, AppError> {
    let (id,): (Uuid,) = sqlx::query_as(
        "INSERT INTO quiz_history
         (user_id, student_name, student_id, question_image, solution)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(new.user_id)
    .bind(new.student_name)
    .bind(new.student_id)
    .bind(new.question_image)
    .bind(new.solution)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

// ────────────────────────────────────────────────────────────────────────────
// Lists (newest first) and owner-scoped deletes
// ────────────────────────────────────────────────────────────────────────────

pub async fn list_assignments(pool: &PgPool, user_id: Uuid) -> Result<Vec<AssignmentRow>, AppError> {
    let rows = sqlx::query_as::<_, AssignmentRow>(
        "SELECT * FROM assignment_history WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_presentations(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PresentationRow>, AppError> {
    let rows = sqlx::query_as::<_, PresentationRow>(
        "SELECT * FROM presentation_history WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_exams(pool: &PgPool, user_id: Uuid) -> Result<Vec<ExamRow>, AppError> {
    let rows = sqlx::query_as::<_, ExamRow>(
        "SELECT * FROM exam_history WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_quizzes(pool: &PgPool, user_id: Uuid) -> Result<Vec<QuizRow>, AppError> {
    let rows = sqlx::query_as::<_, QuizRow>(
        "SELECT * FROM quiz_history WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Deletes one record if it belongs to `user_id`. The ownership check lives
/// in the WHERE clause rather than a prior SELECT.
pub async fn delete_record(
    pool: &PgPool,
    table: HistoryTable,
    record_id: Uuid,
    user_id: Uuid,
) -> Result<(), AppError> {
    let query = match table {
        HistoryTable::Assignment => {
            "DELETE FROM assignment_history WHERE id = $1 AND user_id = $2"
        }
        HistoryTable::Presentation => {
            "DELETE FROM presentation_history WHERE id = $1 AND user_id = $2"
        }
        HistoryTable::Exam => "DELETE FROM exam_history WHERE id = $1 AND user_id = $2",
        HistoryTable::Quiz => "DELETE FROM quiz_history WHERE id = $1 AND user_id = $2",
    };

    let result = sqlx::query(query)
        .bind(record_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "History record {record_id} not found"
        )));
    }

    info!(%record_id, %user_id, ?table, "Deleted history record");
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub enum HistoryTable {
    Assignment,
    Presentation,
    Exam,
    Quiz,
}
