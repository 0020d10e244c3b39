// src/server/routes.rs
//! Axum router configuration for the recipe service

use crate::server::AppState;
use crate::server::handlers::recipes;
use axum::{Router, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // The gateway in front decides who may call; no origin restrictions here
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/recipe",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route("/api/recipe/me", get(recipes::list_my_recipes))
        .route(
            "/api/recipe/:id",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
