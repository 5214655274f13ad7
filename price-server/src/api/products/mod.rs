//! Product API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        // fixed segments before /{id} to avoid path conflicts
        .route("/history", get(handler::price_history))
        .route("/value", get(handler::value_per_unit))
        .route("/{id}", get(handler::get_by_id))
}
