use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Initial page load
        .route("/landing", get(handlers::landing))
        // Generation
        .route("/recommendations", post(handlers::generate))
        // Seed search and detail view
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/:id", get(handlers::movie_details))
        // Share links
        .route(
            "/share",
            get(handlers::read_share).post(handlers::create_share),
        )
}
