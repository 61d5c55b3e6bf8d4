// Route definitions for the service endpoints

use axum::{routing::any, Router};

use crate::config::state::AppState;
use super::handler;

/// Creates router with the public endpoints.
///
/// Every method is accepted on every route.
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", any(handler::hello_handler))
        .route("/health", any(handler::health_handler))
        .route("/var", any(handler::var_handler))
        .route(
            "/callInternalMicroservice",
            any(handler::call_internal_microservice_handler),
        )
        // Unknown paths get the greeting, like a catch-all root route
        .fallback(handler::hello_handler)
}
