//! Invoice API Module

mod handler;

use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;

/// Invoice router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/invoices", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::ledger).post(handler::create))
        .route("/{id}/status", put(handler::set_status))
        .route("/remind", post(handler::remind))
        .route("/templates", get(handler::templates))
}
