//! Product API Module
//!
//! Public catalog reads. Inventory mutation only ever happens through the
//! checkout and lifecycle flows, never through this surface.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Product router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
}
