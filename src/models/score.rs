// src/models/score.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'scores' table in the database.
/// One row per completed quiz attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Score {
    pub id: i64,
    pub quiz_id: i64,
    pub user_id: i64,
    pub timestamp_of_attempt: chrono::DateTime<chrono::Utc>,
    pub total_score: i64,
    pub accuracy_percentage: f64,
}

/// Attempt row joined with its chapter and subject names, as listed on
/// the user's scores page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScoreWithContext {
    pub id: i64,
    pub quiz_id: i64,
    pub subject_name: String,
    pub chapter_name: String,
    pub timestamp_of_attempt: chrono::DateTime<chrono::Utc>,
    pub total_score: i64,
    pub accuracy_percentage: f64,
}

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// User's answers map.
    /// Key: Question ID (i64)
    /// Value: the selected option number (1..=4)
    pub answers: HashMap<i64, i32>,
}

/// DTO returned after grading a submission.
#[derive(Debug, Serialize)]
pub struct SubmitQuizResponse {
    pub score_id: i64,
    pub total_score: i64,
    pub total_questions: usize,
    pub accuracy_percentage: f64,
}
