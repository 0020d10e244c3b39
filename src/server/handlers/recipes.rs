// src/server/handlers/recipes.rs
//! Recipe CRUD handlers
//!
//! Every handler hands the aggregator call to the blocking pool: it does
//! SQLite I/O and blocking HTTP lookups.

use crate::recipes::{RecipeRequest, RecipeResponse};
use crate::server::AppState;
use crate::server::error::{ApiError, ApiResult, ProblemDetails};
use crate::server::identity::CallerIdentity;
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};

/// POST /api/recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    caller: CallerIdentity,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RecipeResponse>)> {
    let Json(request) = payload?;
    let service = state.service.clone();

    let recipe = run_blocking(move || service.create(&request, &caller.email)).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// GET /api/recipe
pub async fn list_recipes(State(state): State<AppState>) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let service = state.service.clone();
    let recipes = run_blocking(move || service.list_all()).await?;
    Ok(Json(recipes))
}

/// GET /api/recipe/me
pub async fn list_my_recipes(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> ApiResult<Json<Vec<RecipeResponse>>> {
    let service = state.service.clone();
    let recipes = run_blocking(move || service.list_mine(&caller.email)).await?;
    Ok(Json(recipes))
}

/// GET /api/recipe/:id
pub async fn get_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<RecipeResponse>> {
    let Path(id) = id?;
    let service = state.service.clone();

    let recipe = run_blocking(move || service.get(id)).await?;
    Ok(Json(recipe))
}

/// PUT /api/recipe/:id
pub async fn update_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    caller: CallerIdentity,
    payload: Result<Json<RecipeRequest>, JsonRejection>,
) -> ApiResult<Json<RecipeResponse>> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let service = state.service.clone();

    let recipe = run_blocking(move || service.update(id, &request, &caller.email)).await?;
    Ok(Json(recipe))
}

/// DELETE /api/recipe/:id
pub async fn delete_recipe(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    let service = state.service.clone();

    run_blocking(move || service.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> crate::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError(ProblemDetails::internal(&format!("Task join error: {}", e))))?
        .map_err(ApiError::from)
}
