//! Prospect API Module

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::ServerState;

/// Prospect router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/prospects", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/stage", put(handler::set_stage))
}
