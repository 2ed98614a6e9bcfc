//! Contact API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Contact router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/contacts/{id}", get(handler::get_by_id))
}
