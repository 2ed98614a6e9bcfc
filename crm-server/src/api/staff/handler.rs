//! Staff API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use shared::models::{User, UserCreate, UserUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::CurrentActor;
use crate::core::ServerState;

const RESOURCE: &str = "staff";

/// List all staff members
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.store.users()))
}

/// Get a staff member by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = state
        .store
        .find_user(id)
        .ok_or_else(|| AppError::new(ErrorCode::StaffNotFound))?;
    Ok(Json(user))
}

/// Create a staff member; permissions default from the role
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let user = state.store.add_user(payload)?;
    state.bump_version(RESOURCE);
    Ok(Json(user))
}

/// Update a staff member
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let user = state.store.update_user(id, payload)?;
    state.bump_version(RESOURCE);
    Ok(Json(user))
}

/// Delete a staff member (hard delete; admins cannot delete themselves)
pub async fn delete(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if actor.id == id {
        return Err(AppError::new(ErrorCode::StaffCannotDeleteSelf));
    }
    state.store.remove_user(id)?;
    state.bump_version(RESOURCE);
    Ok(Json(true))
}
