//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing) and
//! returns the axum router ready for serving.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS is permissive for development; restrict in production.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Availability
        .route("/availability", post(handlers::add_availability))
        .route("/availability", get(handlers::list_availability))
        .route("/availability", delete(handlers::delete_availability))
        .route("/recurring", post(handlers::add_recurring))
        .route("/overlap", get(handlers::find_overlap))
        // Users
        .route("/users", post(handlers::add_users))
        .route("/users", get(handlers::list_users))
        .route("/user", get(handlers::get_user_by_email))
        .route("/user/{id}", get(handlers::get_user_by_id));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
