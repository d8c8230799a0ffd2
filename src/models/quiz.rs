// src/models/quiz.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub chapter_id: i64,
    pub date_of_quiz: NaiveDate,
    /// Duration in "HH:MM" format, as entered by the administrator.
    pub time_duration: Option<String>,
    pub remarks: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    pub chapter_id: i64,
    pub date_of_quiz: NaiveDate,
    #[validate(length(max = 10))]
    pub time_duration: Option<String>,
    #[validate(length(max = 2000))]
    pub remarks: Option<String>,
}

/// DTO for updating a quiz. Fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateQuizRequest {
    pub chapter_id: Option<i64>,
    pub date_of_quiz: Option<NaiveDate>,
    pub time_duration: Option<String>,
    pub remarks: Option<String>,
}
