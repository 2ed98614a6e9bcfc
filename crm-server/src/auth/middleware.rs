//! Actor middleware
//!
//! Resolves the `X-Actor-Id` header against the staff collection and
//! injects [`CurrentActor`] into request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use shared::{AppError, ErrorCode};

use crate::auth::CurrentActor;
use crate::core::ServerState;

/// Actor middleware, applied to every route
///
/// # Skipped paths
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/`, including `/health`
///
/// # Errors
///
/// | Condition | HTTP status |
/// |-----------|-------------|
/// | Missing `X-Actor-Id` header | 401 NotAuthenticated |
/// | Unparseable or unknown actor id | 401 InvalidActor |
/// | Actor account deactivated | 401 AccountDisabled |
pub async fn require_actor(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // Allow CORS preflight through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API routes return 404 as usual; /health stays public
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let header = req
        .headers()
        .get("x-actor-id")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?;

    let actor_id: i64 = header
        .parse()
        .map_err(|_| AppError::invalid_actor(format!("Malformed actor id: {}", header)))?;

    let user = state
        .store
        .find_user(actor_id)
        .ok_or_else(|| AppError::invalid_actor(format!("Unknown actor: {}", actor_id)))?;

    if !user.is_active {
        tracing::warn!(actor = actor_id, "Deactivated actor rejected");
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    req.extensions_mut().insert(CurrentActor::from(&user));
    Ok(next.run(req).await)
}

/// Admin gate, layered onto staff mutation routes
///
/// Fails closed: no actor context at all is also a 403.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    match req.extensions().get::<CurrentActor>() {
        Some(actor) if actor.is_admin() => Ok(next.run(req).await),
        _ => Err(AppError::admin_required()),
    }
}
