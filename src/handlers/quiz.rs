// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::score::{Score, ScoreWithContext, SubmitQuizRequest, SubmitQuizResponse},
    utils::jwt::Claims,
};

/// Answer key row for grading a submission.
#[derive(sqlx::FromRow)]
struct AnswerKey {
    id: i64,
    correct_option: i32,
}

/// Submits a user's quiz answers and records the attempt.
///
/// * Compares each answer with the question's correct option.
/// * Score is the number of correct answers; accuracy is their share
///   of the quiz's questions as a percentage.
/// * Inserts a scores row and returns the grading summary.
pub async fn submit_quiz(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(quiz_id): Path<i64>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let answer_keys = sqlx::query_as::<_, AnswerKey>(
        "SELECT id, correct_option FROM questions WHERE quiz_id = $1",
    )
    .bind(quiz_id)
    .fetch_all(&pool)
    .await?;

    if answer_keys.is_empty() {
        return Err(AppError::BadRequest(
            "This quiz has no questions yet".to_string(),
        ));
    }

    let (total_score, accuracy) = grade(&answer_keys, &req.answers);
    let total_questions = answer_keys.len();

    let score_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO scores (quiz_id, user_id, timestamp_of_attempt, total_score, accuracy_percentage)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(quiz_id)
    .bind(claims.user_id())
    .bind(Utc::now())
    .bind(total_score)
    .bind(accuracy)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to record quiz attempt: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitQuizResponse {
            score_id,
            total_score,
            total_questions,
            accuracy_percentage: accuracy,
        }),
    ))
}

fn grade(answer_keys: &[AnswerKey], answers: &HashMap<i64, i32>) -> (i64, f64) {
    let correct = answer_keys
        .iter()
        .filter(|key| answers.get(&key.id) == Some(&key.correct_option))
        .count();

    let accuracy = correct as f64 / answer_keys.len() as f64 * 100.0;
    (correct as i64, accuracy)
}

/// Lists the caller's attempts, newest first, with subject and chapter
/// names for display.
pub async fn list_my_scores(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let scores = sqlx::query_as::<_, ScoreWithContext>(
        r#"
        SELECT
            s.id, s.quiz_id,
            sub.name AS subject_name, c.name AS chapter_name,
            s.timestamp_of_attempt, s.total_score, s.accuracy_percentage
        FROM scores s
        JOIN quizzes q ON s.quiz_id = q.id
        JOIN chapters c ON q.chapter_id = c.id
        JOIN subjects sub ON c.subject_id = sub.id
        WHERE s.user_id = $1
        ORDER BY s.timestamp_of_attempt DESC
        "#,
    )
    .bind(claims.user_id())
    .fetch_all(&pool)
    .await?;

    Ok(Json(scores))
}

/// Fetches one attempt. Users may only read their own results.
pub async fn get_score(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(score_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let score = sqlx::query_as::<_, Score>(
        r#"
        SELECT id, quiz_id, user_id, timestamp_of_attempt, total_score, accuracy_percentage
        FROM scores
        WHERE id = $1
        "#,
    )
    .bind(score_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Score not found".to_string()))?;

    if score.user_id != claims.user_id() && !claims.is_admin() {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    Ok(Json(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[(i64, i32)]) -> Vec<AnswerKey> {
        pairs
            .iter()
            .map(|&(id, correct_option)| AnswerKey { id, correct_option })
            .collect()
    }

    #[test]
    fn grading_counts_exact_option_matches() {
        let keys = keys(&[(1, 2), (2, 4), (3, 1)]);
        let answers = HashMap::from([(1, 2), (2, 3), (3, 1)]);

        let (score, accuracy) = grade(&keys, &answers);
        assert_eq!(score, 2);
        assert!((accuracy - 66.666_666).abs() < 0.001);
    }

    #[test]
    fn unanswered_questions_score_zero() {
        let keys = keys(&[(1, 1), (2, 2)]);
        let (score, accuracy) = grade(&keys, &HashMap::new());
        assert_eq!(score, 0);
        assert_eq!(accuracy, 0.0);
    }
}
