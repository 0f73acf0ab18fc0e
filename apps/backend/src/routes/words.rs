//! Word catalog endpoints

use axum::{extract::State, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedGuardian;
use crate::AppState;

/// POST /api/words/seed
/// Bulk-loads system words. Only available when ADMIN_ENABLED is set.
pub async fn seed(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
    Json(request): Json<SeedWordsRequest>,
) -> Result<Json<SeedReport>> {
    if !state.admin_enabled {
        return Err(ApiError::Forbidden("Seeding is disabled".to_string()));
    }

    tracing::info!(guardian_id = %auth.guardian_id, entries = request.words.len(), "seeding words");
    let report = state.speller.seed_words(request.words).await?;

    Ok(Json(report))
}

/// POST /api/words/custom
pub async fn add_custom(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
    Json(request): Json<AddCustomWordRequest>,
) -> Result<Json<Word>> {
    let word = state
        .speller
        .add_custom_word(
            auth.guardian_id,
            &request.text,
            request.level.unwrap_or(Level::Custom),
            request.hint_sentence,
        )
        .await?;

    Ok(Json(word))
}

/// GET /api/words/custom
pub async fn list_custom(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
) -> Result<Json<WordListResponse>> {
    let words = state.speller.owned_words(auth.guardian_id).await?;
    Ok(Json(WordListResponse { words }))
}

/// GET /api/words/counts
pub async fn counts(State(state): State<AppState>) -> Result<Json<WordCountsResponse>> {
    let counts = state.speller.word_counts().await?;
    Ok(Json(WordCountsResponse { counts }))
}
