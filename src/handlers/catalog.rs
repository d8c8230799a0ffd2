// src/handlers/catalog.rs
//
// User-facing browsing of the Subject → Chapter → Quiz → Question
// hierarchy. Questions are served through a DTO that hides the answer.

use axum::{Json, extract::Path, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        question::PublicQuestion,
        quiz::Quiz,
        subject::{Chapter, Subject},
    },
};

/// Lists all subjects. Open endpoint, also used by the public API.
pub async fn list_subjects(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let subjects = sqlx::query_as::<_, Subject>(
        "SELECT id, name, description, created_at FROM subjects ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(subjects))
}

/// Lists the chapters of one subject.
pub async fn list_chapters(
    State(pool): State<PgPool>,
    Path(subject_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let subject = sqlx::query_as::<_, Subject>(
        "SELECT id, name, description, created_at FROM subjects WHERE id = $1",
    )
    .bind(subject_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Subject not found".to_string()))?;

    let chapters = sqlx::query_as::<_, Chapter>(
        r#"
        SELECT id, subject_id, name, description, created_at
        FROM chapters
        WHERE subject_id = $1
        ORDER BY name
        "#,
    )
    .bind(subject.id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(chapters))
}

/// Lists the quizzes of one chapter.
pub async fn list_quizzes(
    State(pool): State<PgPool>,
    Path(chapter_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let chapter = sqlx::query_as::<_, Chapter>(
        "SELECT id, subject_id, name, description, created_at FROM chapters WHERE id = $1",
    )
    .bind(chapter_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Chapter not found".to_string()))?;

    let quizzes = sqlx::query_as::<_, Quiz>(
        r#"
        SELECT id, chapter_id, date_of_quiz, time_duration, remarks, created_at
        FROM quizzes
        WHERE chapter_id = $1
        ORDER BY date_of_quiz
        "#,
    )
    .bind(chapter.id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(quizzes))
}

/// Lists a quiz's questions for taking it, without the correct answers.
pub async fn list_questions(
    State(pool): State<PgPool>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM quizzes WHERE id = $1")
        .bind(quiz_id)
        .fetch_optional(&pool)
        .await?;

    if exists.is_none() {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    let questions = sqlx::query_as::<_, PublicQuestion>(
        r#"
        SELECT id, quiz_id, question_statement, option1, option2, option3, option4
        FROM questions
        WHERE quiz_id = $1
        ORDER BY id
        "#,
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(questions))
}
