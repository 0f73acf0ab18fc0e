//! Guardian registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{GuardianRegisterRequest, GuardianRegisterResponse, GuardianStatusResponse};
use crate::routes::auth::AuthenticatedGuardian;
use crate::AppState;

/// POST /api/guardian/register
/// Creates a guardian account and returns its token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Option<GuardianRegisterRequest>>,
) -> Result<Json<GuardianRegisterResponse>> {
    let name = payload.and_then(|p| p.name);
    let guardian = state.db.create_guardian(name.as_deref()).await?;

    tracing::info!(guardian_id = %guardian.id, "registered guardian");

    Ok(Json(GuardianRegisterResponse {
        guardian_id: guardian.id,
        token: guardian.token,
    }))
}

/// GET /api/guardian/status
pub async fn status(
    Extension(auth): Extension<AuthenticatedGuardian>,
    State(state): State<AppState>,
) -> Result<Json<GuardianStatusResponse>> {
    let guardian = state
        .db
        .get_guardian_by_token(&auth.token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Guardian not found".to_string()))?;

    Ok(Json(GuardianStatusResponse {
        guardian_id: guardian.id,
        last_seen_at: guardian.last_seen_at,
    }))
}
