//! Contact API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::models::Contact;
use shared::{AppError, AppResult};

use crate::auth::{CurrentActor, in_scope};
use crate::core::ServerState;

/// Unified lookup across clients and prospects; clients win on id clashes
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(id): Path<i64>,
) -> AppResult<Json<Contact>> {
    if let Some(client) = state.store.find_client(id).filter(|c| in_scope(&actor, c)) {
        return Ok(Json(Contact::Client(client)));
    }
    if let Some(prospect) = state
        .store
        .find_prospect(id)
        .filter(|p| in_scope(&actor, p))
    {
        return Ok(Json(Contact::Prospect(prospect)));
    }
    Err(AppError::not_found(format!("Contact {}", id)))
}
