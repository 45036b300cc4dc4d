//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    chat_handler, evaluate_quiz_handler, generate_quiz_handler, generate_timetable_handler,
    health_handler, stats_handler, AppState,
};

/// Creates the router with CORS open to any origin.
pub fn create_router(state: AppState) -> Router {
    build_router(state, AllowOrigin::any())
}

/// Creates the router with CORS restricted to the dashboard frontend.
///
/// Falls back to any origin if `frontend_url` is not a valid header value.
pub fn create_router_for_origin(state: AppState, frontend_url: &str) -> Router {
    let origin = match HeaderValue::from_str(frontend_url) {
        Ok(origin) => AllowOrigin::exact(origin),
        Err(_) => {
            warn!(%frontend_url, "invalid FRONTEND_URL, allowing any origin");
            AllowOrigin::any()
        }
    };
    build_router(state, origin)
}

fn build_router(state: AppState, origin: AllowOrigin) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/chatbot", post(chat_handler))
        .route("/api/quiz/generate", post(generate_quiz_handler))
        .route("/api/quiz/evaluate", post(evaluate_quiz_handler))
        .route("/api/timetable/generate", post(generate_timetable_handler))
        .route("/api/cache/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
