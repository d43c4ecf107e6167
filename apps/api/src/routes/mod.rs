pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::advice::handlers as advice;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route("/api/v1/sessions/:id", delete(session::handle_end_session))
        .route(
            "/api/v1/sessions/:id/history",
            get(session::handle_history).delete(session::handle_clear_history),
        )
        .route("/api/v1/sessions/:id/latest", get(session::handle_latest))
        // Advice
        .route("/api/v1/sessions/:id/advice", post(advice::handle_generate))
        .route("/api/v1/prompt/preview", post(advice::handle_preview_prompt))
        .with_state(state)
}
