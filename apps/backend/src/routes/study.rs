//! Study endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use speller_core::WordCatalog;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedGuardian;
use crate::routes::learners::require_learner;
use crate::AppState;

/// GET /api/study/queue
pub async fn queue(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
    Query(query): Query<StudyQueueQuery>,
) -> Result<Json<StudyQueueResponse>> {
    require_learner(&state, auth.guardian_id, query.learner_id).await?;

    let items = state
        .speller
        .get_study_queue(&query.level, query.learner_id, Some(auth.guardian_id))
        .await?;

    Ok(Json(StudyQueueResponse {
        remaining: items.len(),
        items,
    }))
}

/// POST /api/study/check
pub async fn check(
    State(state): State<AppState>,
    Json(request): Json<CheckGuessRequest>,
) -> Result<Json<GuessResult>> {
    Ok(Json(state.speller.compare_guess(&request.guess, &request.answer)))
}

/// POST /api/study/outcome
pub async fn outcome(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
    Json(request): Json<SubmitOutcomeRequest>,
) -> Result<Json<SubmitOutcomeResponse>> {
    require_learner(&state, auth.guardian_id, request.learner_id).await?;

    // Custom words of other guardians are not practicable here.
    state
        .db
        .get_word(request.word_id)
        .await?
        .filter(|w| w.visible_to(Some(auth.guardian_id)))
        .ok_or_else(|| ApiError::NotFound(format!("Word {}", request.word_id)))?;

    let progress = state
        .speller
        .submit_outcome(request.learner_id, request.word_id, request.outcome)
        .await?;

    Ok(Json(SubmitOutcomeResponse { progress }))
}

/// GET /api/study/next
pub async fn next(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
    Query(query): Query<NextItemQuery>,
) -> Result<Json<NextItemResponse>> {
    require_learner(&state, auth.guardian_id, query.learner_id).await?;

    let items = state
        .speller
        .get_study_queue(&query.level, query.learner_id, Some(auth.guardian_id))
        .await?;

    Ok(Json(NextItemResponse {
        next_id: state.speller.next_item(&items, query.current_id),
    }))
}

/// GET /api/study/mastered
pub async fn mastered(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedGuardian>,
    Query(query): Query<MasteredQuery>,
) -> Result<Json<MasteredResponse>> {
    require_learner(&state, auth.guardian_id, query.learner_id).await?;

    let mastered = state
        .speller
        .mastered_count(query.level, query.learner_id, Some(auth.guardian_id))
        .await?;

    Ok(Json(MasteredResponse {
        level: query.level,
        mastered,
    }))
}
