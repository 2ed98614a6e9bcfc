//! Pipeline API Module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Pipeline router
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/pipeline", get(handler::board))
}
