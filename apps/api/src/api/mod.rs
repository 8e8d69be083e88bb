// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod extract;
pub mod handlers;
pub mod middleware;

use axum::{
    http::header::AUTHORIZATION,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use handlers::{auth, generate, stamps};

/// Builds the application router without transport middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(auth::health_check))
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/api/register", post(auth::validate_registration))
        // Image generation
        .route("/api/generate", post(generate::generate))
        // Stamp routes
        .route("/api/stamp", post(stamps::create_stamp))
        .route("/api/stamp/get", get(stamps::list_stamps))
        .route("/api/stamp/:id/image", get(stamps::stamp_image))
        .with_state(state)
}

/// Builds the served application: the router plus tracing and CORS
///
/// CORS allows any origin, method and header and exposes `Authorization`,
/// which carries the login token.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([AUTHORIZATION]);

    router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
