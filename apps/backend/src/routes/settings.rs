//! Settings endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedGuardian;
use crate::AppState;

/// GET /api/settings
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
) -> Result<Json<SettingsResponse>> {
    let settings = state
        .db
        .get_settings(auth.guardian_id)
        .await?
        .map(|s| s.to_api_settings())
        .unwrap_or_default();

    Ok(Json(settings))
}

/// PUT /api/settings/voice
/// A blank or missing voice id clears the preference.
pub async fn update_voice(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
    Json(request): Json<UpdateVoiceRequest>,
) -> Result<Json<SettingsResponse>> {
    let voice_id = request
        .voice_id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let settings = state.db.upsert_voice(auth.guardian_id, voice_id).await?;

    Ok(Json(settings.to_api_settings()))
}
