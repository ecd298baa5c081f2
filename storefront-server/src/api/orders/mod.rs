//! Order API Module
//!
//! Quote, placement, and lifecycle. Every route requires a verified caller;
//! admin-only routes enforce the role inside the service layer.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Place an order (authenticated); GET is the admin summary listing
        .route("/", post(handler::place).get(handler::list))
        // Price a cart without committing anything
        .route("/quote", post(handler::quote))
        // The caller's own orders
        .route("/mine", get(handler::mine))
        // Order detail (owner or admin)
        .route("/{id}", get(handler::get_by_id))
        // Status transition (admin)
        .route("/{id}/status", put(handler::update_status))
        // Payment attachment (owner or admin)
        .route("/{id}/pay", put(handler::pay))
}
