//! Session API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use shared::models::{Session, SessionCreate, SessionUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::{CurrentActor, in_scope, scope};
use crate::core::ServerState;

const RESOURCE: &str = "session";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub coach_id: Option<i64>,
}

/// List sessions visible to the actor
pub async fn list(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Session>>> {
    let mut sessions = scope(&actor, state.store.sessions());
    if actor.is_admin() {
        if let Some(coach_id) = query.coach_id {
            sessions.retain(|s| s.assigned_coach_id == Some(coach_id));
        }
    }
    Ok(Json(sessions))
}

/// Get a session by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
) -> AppResult<Json<Session>> {
    let session = state
        .store
        .find_session(id)
        .filter(|s| in_scope(&actor, s))
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    Ok(Json(session))
}

/// Create a session; the client name is snapshotted onto the record
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SessionCreate>,
) -> AppResult<Json<Session>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let session = state.store.add_session(payload)?;
    state.bump_version(RESOURCE);
    Ok(Json(session))
}

/// Update a session
pub async fn update(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
    Json(payload): Json<SessionUpdate>,
) -> AppResult<Json<Session>> {
    state
        .store
        .find_session(id)
        .filter(|s| in_scope(&actor, s))
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    let session = state.store.update_session(id, payload)?;
    state.bump_version(RESOURCE);
    Ok(Json(session))
}

/// Schedule the follow-up session: same client, type and duration, one
/// week later
pub async fn schedule_next(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
) -> AppResult<Json<Session>> {
    state
        .store
        .find_session(id)
        .filter(|s| in_scope(&actor, s))
        .ok_or_else(|| AppError::new(ErrorCode::SessionNotFound))?;
    let session = state.store.schedule_next_session(id)?;
    state.bump_version(RESOURCE);
    Ok(Json(session))
}
