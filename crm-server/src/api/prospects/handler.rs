//! Prospect API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use shared::models::{PipelineStage, Prospect, ProspectCreate, ProspectUpdate};
use shared::{AppError, AppResult, ErrorCode};

use crate::auth::{CurrentActor, in_scope, scope};
use crate::core::ServerState;

const RESOURCE: &str = "prospect";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub coach_id: Option<i64>,
}

/// List prospects visible to the actor
pub async fn list(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Prospect>>> {
    let mut prospects = scope(&actor, state.store.prospects());
    if actor.is_admin() {
        if let Some(coach_id) = query.coach_id {
            prospects.retain(|p| p.assigned_coach_id == Some(coach_id));
        }
    }
    Ok(Json(prospects))
}

/// Get a prospect by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
) -> AppResult<Json<Prospect>> {
    let prospect = state
        .store
        .find_prospect(id)
        .filter(|p| in_scope(&actor, p))
        .ok_or_else(|| AppError::new(ErrorCode::ProspectNotFound))?;
    Ok(Json(prospect))
}

/// Create a prospect; new prospects start in the lead stage
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProspectCreate>,
) -> AppResult<Json<Prospect>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let prospect = state.store.add_prospect(payload);
    state.bump_version(RESOURCE);
    Ok(Json(prospect))
}

/// Update a prospect
pub async fn update(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
    Json(payload): Json<ProspectUpdate>,
) -> AppResult<Json<Prospect>> {
    state
        .store
        .find_prospect(id)
        .filter(|p| in_scope(&actor, p))
        .ok_or_else(|| AppError::new(ErrorCode::ProspectNotFound))?;
    let prospect = state.store.update_prospect(id, payload)?;
    state.bump_version(RESOURCE);
    Ok(Json(prospect))
}

#[derive(Debug, Deserialize)]
pub struct StagePayload {
    pub stage: PipelineStage,
}

/// Move a prospect to another stage (kanban drag)
pub async fn set_stage(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
    Json(payload): Json<StagePayload>,
) -> AppResult<Json<Prospect>> {
    state
        .store
        .find_prospect(id)
        .filter(|p| in_scope(&actor, p))
        .ok_or_else(|| AppError::new(ErrorCode::ProspectNotFound))?;
    let prospect = state.store.set_prospect_stage(id, payload.stage)?;
    state.bump_version(RESOURCE);
    Ok(Json(prospect))
}
