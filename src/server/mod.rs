// src/server/mod.rs
//! HTTP front end for the recipe service
//!
//! Exposes recipe CRUD under `/api/recipe`. The aggregator underneath is
//! synchronous; handlers run it on tokio's blocking pool.

pub mod config;
mod error;
mod handlers;
mod identity;
mod routes;

pub use config::RecipesConfig;
pub use error::{ApiError, ApiResult, ProblemDetails};
pub use identity::{CallerIdentity, USER_EMAIL_HEADER};
pub use routes::create_router;

use crate::db;
use crate::recipes::RecipeService;
use crate::recipes::lines::LOOKUP_THREADS;
use crate::remote::{DEFAULT_TIMEOUT, IngredientServiceClient, UserServiceClient};
use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the recipe database
    pub db_path: PathBuf,
    /// Base URL of the user service
    pub user_url: String,
    /// Base URL of the ingredient service
    pub ingredient_url: String,
    /// Per-call timeout for owning-service lookups
    pub request_timeout: Duration,
    /// Worker threads for concurrent ingredient lookups
    pub lookup_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: PathBuf::from("/var/lib/chomp/recipes.db"),
            user_url: "http://localhost:8081".to_string(),
            ingredient_url: "http://localhost:8082".to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            lookup_threads: LOOKUP_THREADS,
        }
    }
}

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecipeService>,
}

impl AppState {
    pub fn new(service: Arc<RecipeService>) -> Self {
        Self { service }
    }
}

/// Initialize the database and wire the aggregator to the HTTP clients
///
/// Call this outside the tokio runtime: the blocking HTTP clients must be
/// created and dropped off the async threads.
pub fn build_service(config: &ServerConfig) -> crate::Result<RecipeService> {
    db::init(&config.db_path)?;

    let users = UserServiceClient::new(&config.user_url, config.request_timeout)?;
    let ingredients = IngredientServiceClient::new(&config.ingredient_url, config.request_timeout)?;

    RecipeService::with_lookup_threads(
        config.db_path.clone(),
        Arc::new(users),
        Arc::new(ingredients),
        config.lookup_threads,
    )
}

/// Serve the recipe API until Ctrl-C
pub async fn run_server(config: ServerConfig, service: Arc<RecipeService>) -> Result<()> {
    tracing::info!("Starting recipe service on {}", config.bind_addr);
    tracing::info!("Database: {:?}", config.db_path);
    tracing::info!("User service: {}", config.user_url);
    tracing::info!("Ingredient service: {}", config.ingredient_url);
    tracing::info!("Lookup timeout: {:?}", config.request_timeout);
    tracing::info!("Lookup threads: {}", config.lookup_threads);

    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Recipe service is ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Recipe service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
