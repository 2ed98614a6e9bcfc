//! KPI API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use shared::AppResult;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::services::kpi::{self, Kpi, KpiPage};

#[derive(Debug, Deserialize)]
pub struct KpiQuery {
    pub page: KpiPage,
}

/// KPI banner for a page, role-scoped to the actor
pub async fn banner(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Query(query): Query<KpiQuery>,
) -> AppResult<Json<Vec<Kpi>>> {
    let snapshot = state.store.snapshot();
    let kpis = kpi::for_page(query.page, &actor, &snapshot, state.today());
    Ok(Json(kpis))
}
