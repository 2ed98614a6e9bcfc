//! Client API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use shared::models::{Client, ClientCreate, ClientUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::{CurrentActor, in_scope, scope};
use crate::core::ServerState;

const RESOURCE: &str = "client";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Admin-only narrowing to one coach, independent of role scoping
    pub coach_id: Option<i64>,
}

/// List clients visible to the actor
pub async fn list(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let mut clients = scope(&actor, state.store.clients());
    if actor.is_admin() {
        if let Some(coach_id) = query.coach_id {
            clients.retain(|c| c.assigned_coach_id == coach_id);
        }
    }
    Ok(Json(clients))
}

/// Get a client by id; out-of-scope reads 404 like absent records
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
) -> AppResult<Json<Client>> {
    let client = state
        .store
        .find_client(id)
        .filter(|c| in_scope(&actor, c))
        .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;
    Ok(Json(client))
}

/// Create a client
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<Json<Client>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let client = state.store.add_client(payload, state.today());
    state.bump_version(RESOURCE);
    Ok(Json(client))
}

/// Update a client
pub async fn update(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    state
        .store
        .find_client(id)
        .filter(|c| in_scope(&actor, c))
        .ok_or_else(|| AppError::new(ErrorCode::ClientNotFound))?;
    let client = state.store.update_client(id, payload)?;
    state.bump_version(RESOURCE);
    Ok(Json(client))
}
