//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Authenticated guardian stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedGuardian {
    pub guardian_id: Uuid,
    pub token: String,
}

/// Auth middleware - extracts guardian token from Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))?
        .to_string();

    let guardian = state
        .db
        .get_guardian_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid guardian token".to_string()))?;

    state.db.update_last_seen(guardian.id).await?;

    request.extensions_mut().insert(AuthenticatedGuardian {
        guardian_id: guardian.id,
        token,
    });

    Ok(next.run(request).await)
}
