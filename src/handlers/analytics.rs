// src/handlers/analytics.rs
//
// Thin glue between storage and the pure aggregators in core::analytics:
// fetch fully joined attempt rows, hand them over, serialize the report.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::PgPool;

use crate::{
    core::analytics::{self, AttemptRecord, PlatformTotals},
    error::AppError,
    utils::jwt::Claims,
};

/// Attempt row joined across the Quiz → Chapter → Subject hierarchy plus
/// the attempting user's display name.
#[derive(sqlx::FromRow)]
struct AttemptRow {
    quiz_id: i64,
    user_id: i64,
    timestamp_of_attempt: chrono::DateTime<chrono::Utc>,
    total_score: i64,
    accuracy_percentage: f64,
    subject_name: String,
    chapter_name: String,
    user_full_name: String,
}

impl From<AttemptRow> for AttemptRecord {
    fn from(row: AttemptRow) -> Self {
        AttemptRecord {
            quiz_id: row.quiz_id,
            user_id: row.user_id,
            attempted_at: row.timestamp_of_attempt,
            total_score: row.total_score,
            accuracy_percentage: row.accuracy_percentage,
            subject_name: row.subject_name,
            chapter_name: row.chapter_name,
            user_full_name: row.user_full_name,
        }
    }
}

const ATTEMPT_QUERY: &str = r#"
    SELECT
        s.quiz_id, s.user_id, s.timestamp_of_attempt,
        s.total_score, s.accuracy_percentage,
        sub.name AS subject_name,
        c.name AS chapter_name,
        u.full_name AS user_full_name
    FROM scores s
    JOIN quizzes q ON s.quiz_id = q.id
    JOIN chapters c ON q.chapter_id = c.id
    JOIN subjects sub ON c.subject_id = sub.id
    JOIN users u ON s.user_id = u.id
"#;

async fn fetch_user_attempts(pool: &PgPool, user_id: i64) -> Result<Vec<AttemptRecord>, AppError> {
    let rows = sqlx::query_as::<_, AttemptRow>(&format!("{ATTEMPT_QUERY} WHERE s.user_id = $1"))
        .bind(user_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(AttemptRecord::from).collect())
}

/// Computes a user's performance report.
///
/// Serves `/api/user/{id}/performance`: users may read their own report,
/// admins anyone's. A user with no attempts gets the zero report, not an
/// error.
pub async fn user_performance(
    State(pool): State<PgPool>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if claims.user_id() != user_id && !claims.is_admin() {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }

    let attempts = fetch_user_attempts(&pool, user_id).await?;
    let report = analytics::performance_report(&attempts);

    Ok(Json(report))
}

/// Platform-wide analytics for the admin dashboard.
/// Admin only.
pub async fn admin_analytics(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let totals = PlatformTotals {
        users: count(&pool, "SELECT COUNT(*) FROM users WHERE is_admin = FALSE").await?,
        subjects: count(&pool, "SELECT COUNT(*) FROM subjects").await?,
        chapters: count(&pool, "SELECT COUNT(*) FROM chapters").await?,
        quizzes: count(&pool, "SELECT COUNT(*) FROM quizzes").await?,
        questions: count(&pool, "SELECT COUNT(*) FROM questions").await?,
        attempts: count(&pool, "SELECT COUNT(*) FROM scores").await?,
    };

    let rows = sqlx::query_as::<_, AttemptRow>(ATTEMPT_QUERY)
        .fetch_all(&pool)
        .await?;
    let attempts: Vec<AttemptRecord> = rows.into_iter().map(AttemptRecord::from).collect();

    let report = analytics::platform_report(totals, &attempts);

    Ok(Json(report))
}

async fn count(pool: &PgPool, query: &str) -> Result<i64, AppError> {
    let n = sqlx::query_scalar::<_, i64>(query).fetch_one(pool).await?;
    Ok(n)
}
