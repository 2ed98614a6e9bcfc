//! KPI API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// KPI router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/kpis", get(handler::banner))
}
