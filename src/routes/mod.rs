//! Router assembly.

mod common;
mod customer;

pub use common::common_routes;
pub use customer::customer_routes;

use crate::config::ServerConfig;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: customer routes under `api_prefix`, common routes at the root.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let customers = customer_routes(state.clone());
    let api = if server.api_prefix.is_empty() {
        customers
    } else {
        Router::new().nest(&server.api_prefix, customers)
    };
    common_routes(state)
        .merge(api)
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
