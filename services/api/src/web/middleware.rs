//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::error::ApiError;
use crate::web::state::AppState;
use research_chat_core::ports::PortError;

/// Middleware that validates the bearer token and extracts the user_id.
///
/// If valid, inserts the user_id into request extensions for handlers to use.
/// If missing, malformed, expired, or forged, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract the Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(PortError::Unauthenticated)?;

    // 2. Parse the bearer token out of it
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(PortError::Unauthenticated)?;

    // 3. Validate the token, get user_id
    let user_id = state.auth.verify(token).map_err(|e| {
        warn!("Rejected bearer token: {}", e);
        e
    })?;

    // 4. Insert user_id into request extensions
    req.extensions_mut().insert(user_id);

    // 5. Continue to the handler
    Ok(next.run(req).await)
}
