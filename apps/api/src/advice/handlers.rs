//! Axum route handlers for the Advice API.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::advice::builder::{build_prompt, PromptMode};
use crate::advice::generator::generate_advice;
use crate::advice::sanitize::SanitizeMode;
use crate::errors::AppError;
use crate::models::advice::AdviceResult;
use crate::models::profile::UserProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AdviceRequest {
    pub profile: UserProfile,
    #[serde(default)]
    pub mode: PromptMode,
}

#[derive(Debug, Serialize)]
pub struct PromptPreviewResponse {
    pub mode: PromptMode,
    pub prompt: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/advice
///
/// Validates the profile, builds the prompt, calls the provider once and
/// appends the outcome to the session history. A provider failure is still a
/// 200: the returned result has `status: "failed"` and an error text.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<AdviceResult>, AppError> {
    state.sessions.ensure_exists(session_id).await?;
    request.profile.validate()?;

    let profile = request.profile.sanitized(sanitize_mode(&state));
    let prompt = build_prompt(&profile, request.mode);
    let model = state.config.model_config();

    let started = Instant::now();
    let outcome = generate_advice(state.llm.as_ref(), &prompt, &model).await;
    let generated = outcome.is_ok();

    let result = state
        .sessions
        .record(session_id, profile, request.mode, outcome)
        .await
        .inspect_err(|_| {
            warn!(
                "Session {session_id} ended during generation; discarding {} advice (generated: {generated})",
                request.mode
            )
        })?;

    info!(
        "Session {session_id}: {} advice {:?} in {}ms",
        request.mode,
        result.status,
        started.elapsed().as_millis()
    );

    Ok(Json(result))
}

/// POST /api/v1/prompt/preview
///
/// Renders the prompt exactly as `handle_generate` would, without calling the provider.
pub async fn handle_preview_prompt(
    State(state): State<AppState>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<PromptPreviewResponse>, AppError> {
    request.profile.validate()?;

    let profile = request.profile.sanitized(sanitize_mode(&state));

    Ok(Json(PromptPreviewResponse {
        mode: request.mode,
        prompt: build_prompt(&profile, request.mode),
    }))
}

fn sanitize_mode(state: &AppState) -> SanitizeMode {
    if state.config.strict_sanitize {
        SanitizeMode::Strict
    } else {
        SanitizeMode::Trim
    }
}
