//! Customer collection, item and activation routes.

use crate::handlers::customer::{
    activate, create, deactivate, delete as delete_handler, list, patch, read, update,
};
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

pub fn customer_routes(state: AppState) -> Router {
    Router::new()
        .route("/customers", get(list).post(create))
        .route(
            "/customers/:id",
            get(read).put(update).patch(patch).delete(delete_handler),
        )
        .route("/customers/:id/active", put(activate).delete(deactivate))
        .with_state(state)
}
