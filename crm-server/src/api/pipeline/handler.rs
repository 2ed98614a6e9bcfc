//! Pipeline API Handlers

use axum::{Json, extract::State};

use shared::AppResult;

use crate::auth::{CurrentActor, scope};
use crate::core::ServerState;
use crate::services::pipeline::{StageBucket, classify};

/// The kanban board: seven stage buckets in fixed order over the actor's
/// visible prospects
pub async fn board(
    State(state): State<ServerState>,
    actor: CurrentActor,
) -> AppResult<Json<Vec<StageBucket>>> {
    let prospects = scope(&actor, state.store.prospects());
    Ok(Json(classify(prospects)))
}
