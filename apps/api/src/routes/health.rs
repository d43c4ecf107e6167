use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the active provider/model.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "career-guidance-api",
        "provider": state.config.provider,
        "model": state.config.model,
        "active_sessions": state.sessions.active_sessions().await
    }))
}
