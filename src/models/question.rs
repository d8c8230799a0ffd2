// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub question_statement: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    /// Which option is correct: 1, 2, 3, or 4.
    pub correct_option: i32,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for sending a question to a quiz taker (excludes the answer).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub quiz_id: i64,
    pub question_statement: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
}

/// DTO for creating a question by hand.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question_statement: String,
    #[validate(length(min = 1, max = 200))]
    pub option1: String,
    #[validate(length(min = 1, max = 200))]
    pub option2: String,
    #[validate(length(min = 1, max = 200))]
    pub option3: String,
    #[validate(length(min = 1, max = 200))]
    pub option4: String,
    #[validate(range(min = 1, max = 4, message = "correct_option must be between 1 and 4."))]
    pub correct_option: i32,
}

/// DTO for updating a question. Fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateQuestionRequest {
    pub question_statement: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    pub option4: Option<String>,
    pub correct_option: Option<i32>,
}

/// DTO for the rule-based question generator endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuestionsRequest {
    /// Comma-separated topic keywords. Falls back to the quiz's chapter
    /// name when omitted, matching the authoring form's default.
    pub keywords: Option<String>,
    #[validate(range(min = 1, max = 50, message = "count must be between 1 and 50."))]
    pub count: usize,
}
