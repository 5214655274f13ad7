//! Discount API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/discounts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/current", get(handler::current))
        .route("/best", get(handler::best))
        .route("/new", get(handler::recently_added))
}
