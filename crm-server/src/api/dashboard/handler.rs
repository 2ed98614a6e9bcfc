//! Dashboard API Handlers

use axum::{Json, extract::State};

use shared::AppResult;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use crate::services::kpi::{DashboardSummary, dashboard_summary};

/// The dashboard totals block, role-scoped like the KPI banner
pub async fn summary(
    State(state): State<ServerState>,
    actor: CurrentActor,
) -> AppResult<Json<DashboardSummary>> {
    let snapshot = state.store.snapshot();
    Ok(Json(dashboard_summary(&actor, &snapshot, state.today())))
}
