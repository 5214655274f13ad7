//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`data`] - snapshot directory import
//! - [`products`] - snapshot listings, value per unit, price history
//! - [`discounts`] - current / best / recently-added discounts
//! - [`basket`] - shopping basket optimization
//! - [`alerts`] - price alert management

pub mod alerts;
pub mod basket;
pub mod data;
pub mod discounts;
pub mod health;
pub mod products;

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(data::router())
        .merge(products::router())
        .merge(discounts::router())
        .merge(basket::router())
        .merge(alerts::router())
}

/// Build the fully configured application with middleware
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Request ID - Generate unique ID for each request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
