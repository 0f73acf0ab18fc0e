//! Learner endpoints

use axum::{extract::State, Extension, Json};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedGuardian;
use crate::AppState;

/// POST /api/learners
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
    Json(request): Json<CreateLearnerRequest>,
) -> Result<Json<Learner>> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Learner name must not be empty".to_string()));
    }

    let learner = state.db.create_learner(auth.guardian_id, name).await?;
    tracing::info!(guardian_id = %auth.guardian_id, learner_id = %learner.id, "created learner");

    Ok(Json(learner))
}

/// GET /api/learners
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
) -> Result<Json<LearnerListResponse>> {
    let learners = state.db.list_learners(auth.guardian_id).await?;
    Ok(Json(LearnerListResponse { learners }))
}

/// Load a learner the guardian owns, or 404.
pub(crate) async fn require_learner(
    state: &AppState,
    guardian_id: Uuid,
    learner_id: Uuid,
) -> Result<Learner> {
    state
        .db
        .get_learner(guardian_id, learner_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Learner {learner_id}")))
}
