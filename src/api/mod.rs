//! HTTP API server

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod errors;
pub mod handlers;
pub mod json;
pub mod params;
pub mod state;

pub use errors::ApiError;
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .route(
                    "/healthcheck",
                    get(handlers::healthcheck).fallback(handlers::method_not_allowed),
                )
                .route(
                    "/movies",
                    post(handlers::create_movie).fallback(handlers::method_not_allowed),
                )
                .route(
                    "/movies/:id",
                    get(handlers::show_movie).fallback(handlers::method_not_allowed),
                ),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
