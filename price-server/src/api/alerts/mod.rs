//! Alert API module

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/alerts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}/activate", put(handler::activate))
        .route("/{id}/deactivate", put(handler::deactivate))
        .route("/evaluate", post(handler::evaluate))
}
