//! Health API Handlers

use axum::{Json, extract::State};
use serde::Serialize;
use std::collections::HashMap;

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub uptime_secs: u64,
    pub resource_versions: HashMap<String, u64>,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        uptime_secs: state.uptime_secs(),
        resource_versions: state.resource_versions.all().into_iter().collect(),
    })
}
