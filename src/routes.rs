// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, analytics, auth, catalog, quiz},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, catalog, quiz, analytics, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Browsing and quiz taking. Subject listing stays open, the rest
    // wants a logged-in user.
    let user_routes = Router::new()
        .route("/api/subjects/{id}/chapters", get(catalog::list_chapters))
        .route("/api/chapters/{id}/quizzes", get(catalog::list_quizzes))
        .route("/api/quizzes/{id}/questions", get(catalog::list_questions))
        .route("/api/quizzes/{id}/submit", post(quiz::submit_quiz))
        .route("/api/scores", get(quiz::list_my_scores))
        .route("/api/scores/{id}", get(quiz::get_score))
        .route("/api/user/{id}/performance", get(analytics::user_performance))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/subjects", post(admin::create_subject))
        .route(
            "/subjects/{id}",
            put(admin::update_subject).delete(admin::delete_subject),
        )
        .route("/chapters", post(admin::create_chapter))
        .route(
            "/chapters/{id}",
            put(admin::update_chapter).delete(admin::delete_chapter),
        )
        .route("/quizzes", post(admin::create_quiz))
        .route(
            "/quizzes/{id}",
            put(admin::update_quiz).delete(admin::delete_quiz),
        )
        .route("/quizzes/{id}/questions", post(admin::create_question))
        .route(
            "/quizzes/{id}/questions/generate",
            post(admin::generate_questions),
        )
        .route(
            "/questions/{id}",
            put(admin::update_question).delete(admin::delete_question),
        )
        .route("/analytics", get(analytics::admin_analytics))
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/api/subjects", get(catalog::list_subjects))
        .merge(user_routes)
        .nest("/api/auth", auth_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
