use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::advice::AdviceResult;
use crate::models::profile::UserProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub count: usize,
    pub entries: Vec<AdviceResult>,
}

#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub session_id: Uuid,
    pub cleared: usize,
}

/// The latest result plus the profile it came from, for a "your profile" panel.
#[derive(Debug, Serialize)]
pub struct LatestResponse {
    pub profile: UserProfile,
    pub result: AdviceResult,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreatedResponse>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse { session_id }),
    )
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.end(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/history
pub async fn handle_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, AppError> {
    let entries = state.sessions.list(session_id).await?;
    Ok(Json(HistoryResponse {
        session_id,
        count: entries.len(),
        entries,
    }))
}

/// DELETE /api/v1/sessions/:id/history
pub async fn handle_clear_history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ClearHistoryResponse>, AppError> {
    let cleared = state.sessions.clear(session_id).await?;
    Ok(Json(ClearHistoryResponse {
        session_id,
        cleared,
    }))
}

/// GET /api/v1/sessions/:id/latest
pub async fn handle_latest(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<LatestResponse>, AppError> {
    let result = state
        .sessions
        .latest(session_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} has no advice yet")))?;

    Ok(Json(LatestResponse {
        profile: result.profile.clone(),
        result,
    }))
}
