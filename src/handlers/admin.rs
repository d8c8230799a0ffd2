// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use validator::Validate;

use crate::{
    core::{generator, knowledge::KnowledgeBase},
    error::AppError,
    models::{
        question::{CreateQuestionRequest, GenerateQuestionsRequest, UpdateQuestionRequest},
        quiz::{CreateQuizRequest, UpdateQuizRequest},
        subject::{
            CreateChapterRequest, CreateSubjectRequest, UpdateChapterRequest,
            UpdateSubjectRequest,
        },
        user::User,
    },
};

/// Lists all non-admin users.
/// Admin only.
pub async fn list_users(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password, full_name, qualification, date_of_birth, is_admin, created_at
        FROM users
        WHERE is_admin = FALSE
        ORDER BY id DESC
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list users: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(users))
}

/// Creates a new subject.
/// Admin only.
pub async fn create_subject(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO subjects (name, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(&payload.name)
    .bind(&payload.description)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create subject: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Updates a subject by ID.
/// Admin only.
pub async fn update_subject(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.is_none() && payload.description.is_none() {
        return Ok(StatusCode::OK);
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE subjects SET ");
    let mut separated = builder.separated(", ");

    if let Some(name) = payload.name {
        separated.push("name = ");
        separated.push_bind_unseparated(name);
    }

    if let Some(description) = payload.description {
        separated.push("description = ");
        separated.push_bind_unseparated(description);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&pool).await.map_err(|e| {
        tracing::error!("Failed to update subject: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Subject not found".to_string()));
    }

    Ok(StatusCode::OK)
}

/// Deletes a subject and, through cascade, its chapters, quizzes,
/// questions and scores.
/// Admin only.
pub async fn delete_subject(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete subject: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Subject not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Creates a new chapter under a subject.
/// Admin only.
pub async fn create_chapter(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateChapterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO chapters (subject_id, name, description) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(payload.subject_id)
    .bind(&payload.name)
    .bind(&payload.description)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("foreign key") {
            AppError::BadRequest("Subject does not exist".to_string())
        } else {
            tracing::error!("Failed to create chapter: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Updates a chapter by ID.
/// Admin only.
pub async fn update_chapter(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateChapterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.subject_id.is_none() && payload.name.is_none() && payload.description.is_none() {
        return Ok(StatusCode::OK);
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE chapters SET ");
    let mut separated = builder.separated(", ");

    if let Some(subject_id) = payload.subject_id {
        separated.push("subject_id = ");
        separated.push_bind_unseparated(subject_id);
    }

    if let Some(name) = payload.name {
        separated.push("name = ");
        separated.push_bind_unseparated(name);
    }

    if let Some(description) = payload.description {
        separated.push("description = ");
        separated.push_bind_unseparated(description);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&pool).await.map_err(|e| {
        tracing::error!("Failed to update chapter: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Chapter not found".to_string()));
    }

    Ok(StatusCode::OK)
}

/// Deletes a chapter by ID.
/// Admin only.
pub async fn delete_chapter(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM chapters WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete chapter: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Chapter not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Creates a new quiz under a chapter.
/// Admin only.
pub async fn create_quiz(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO quizzes (chapter_id, date_of_quiz, time_duration, remarks)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(payload.chapter_id)
    .bind(payload.date_of_quiz)
    .bind(&payload.time_duration)
    .bind(&payload.remarks)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("foreign key") {
            AppError::BadRequest("Chapter does not exist".to_string())
        } else {
            tracing::error!("Failed to create quiz: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Updates a quiz by ID.
/// Admin only.
pub async fn update_quiz(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.chapter_id.is_none()
        && payload.date_of_quiz.is_none()
        && payload.time_duration.is_none()
        && payload.remarks.is_none()
    {
        return Ok(StatusCode::OK);
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE quizzes SET ");
    let mut separated = builder.separated(", ");

    if let Some(chapter_id) = payload.chapter_id {
        separated.push("chapter_id = ");
        separated.push_bind_unseparated(chapter_id);
    }

    if let Some(date_of_quiz) = payload.date_of_quiz {
        separated.push("date_of_quiz = ");
        separated.push_bind_unseparated(date_of_quiz);
    }

    if let Some(time_duration) = payload.time_duration {
        separated.push("time_duration = ");
        separated.push_bind_unseparated(time_duration);
    }

    if let Some(remarks) = payload.remarks {
        separated.push("remarks = ");
        separated.push_bind_unseparated(remarks);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&pool).await.map_err(|e| {
        tracing::error!("Failed to update quiz: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok(StatusCode::OK)
}

/// Deletes a quiz by ID.
/// Admin only.
pub async fn delete_quiz(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete quiz: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Quiz not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Creates a new question on a quiz.
/// Admin only.
pub async fn create_question(
    State(pool): State<PgPool>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<CreateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO questions
        (quiz_id, question_statement, option1, option2, option3, option4, correct_option)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(quiz_id)
    .bind(&payload.question_statement)
    .bind(&payload.option1)
    .bind(&payload.option2)
    .bind(&payload.option3)
    .bind(&payload.option4)
    .bind(payload.correct_option)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("foreign key") {
            AppError::NotFound("Quiz not found".to_string())
        } else {
            tracing::error!("Failed to create question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        }
    })?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Updates a question by ID.
/// Admin only.
pub async fn update_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.question_statement.is_none()
        && payload.option1.is_none()
        && payload.option2.is_none()
        && payload.option3.is_none()
        && payload.option4.is_none()
        && payload.correct_option.is_none()
    {
        return Ok(StatusCode::OK);
    }

    if let Some(correct) = payload.correct_option {
        if !(1..=4).contains(&correct) {
            return Err(AppError::BadRequest(
                "correct_option must be between 1 and 4".to_string(),
            ));
        }
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE questions SET ");
    let mut separated = builder.separated(", ");

    if let Some(question_statement) = payload.question_statement {
        separated.push("question_statement = ");
        separated.push_bind_unseparated(question_statement);
    }

    if let Some(option1) = payload.option1 {
        separated.push("option1 = ");
        separated.push_bind_unseparated(option1);
    }

    if let Some(option2) = payload.option2 {
        separated.push("option2 = ");
        separated.push_bind_unseparated(option2);
    }

    if let Some(option3) = payload.option3 {
        separated.push("option3 = ");
        separated.push_bind_unseparated(option3);
    }

    if let Some(option4) = payload.option4 {
        separated.push("option4 = ");
        separated.push_bind_unseparated(option4);
    }

    if let Some(correct_option) = payload.correct_option {
        separated.push("correct_option = ");
        separated.push_bind_unseparated(correct_option);
    }

    builder.push(" WHERE id = ");
    builder.push_bind(id);

    let result = builder.build().execute(&pool).await.map_err(|e| {
        tracing::error!("Failed to update question: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::OK)
}

/// Deletes a question by ID.
/// Admin only.
pub async fn delete_question(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Generates questions for a quiz from the knowledge base and persists
/// them.
/// Admin only.
///
/// Keywords default to the quiz's chapter name, the same default the
/// authoring form uses. Questions that come back with fewer than 4
/// options (a knowledge base too small for 3 distractors) cannot fit
/// the question schema and are rejected as a whole batch.
pub async fn generate_questions(
    State(pool): State<PgPool>,
    Path(quiz_id): Path<i64>,
    Json(payload): Json<GenerateQuestionsRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let chapter_name = sqlx::query_scalar::<_, String>(
        r#"
        SELECT c.name
        FROM quizzes q
        JOIN chapters c ON q.chapter_id = c.id
        WHERE q.id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let keywords = payload.keywords.unwrap_or(chapter_name);

    let kb = KnowledgeBase::builtin();
    // ThreadRng is not Send, so keep it out of scope before the inserts.
    let questions = {
        let mut rng = rand::thread_rng();
        generator::generate(&kb, &keywords, payload.count, &mut rng)?
    };

    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(questions.len());

    for question in &questions {
        let [option1, option2, option3, option4]: [&String; 4] = question
            .options
            .iter()
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| {
                AppError::BadRequest(
                    "Knowledge base produced fewer than 4 options".to_string(),
                )
            })?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO questions
            (quiz_id, question_statement, option1, option2, option3, option4, correct_option)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(quiz_id)
        .bind(&question.statement)
        .bind(option1)
        .bind(option2)
        .bind(option3)
        .bind(option4)
        .bind(question.correct_option as i32)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to persist generated question: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

        created.push(id);
    }

    tx.commit().await?;

    tracing::info!(quiz_id, count = created.len(), "generated questions");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "quiz_id": quiz_id,
            "created": created.len(),
            "question_ids": created,
        })),
    ))
}
