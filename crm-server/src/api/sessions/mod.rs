//! Session API Module

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

/// Session router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/sessions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
        .route("/{id}/next", post(handler::schedule_next))
}
