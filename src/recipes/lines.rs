// src/recipes/lines.rs

//! Ingredient line resolution
//!
//! The same lookup serves both directions: on write it proves the
//! referenced ingredient exists, on read it supplies the display name.
//! Lines are independent, so a recipe's lines are looked up concurrently
//! and put back together by index.
//!
//! Lookups block on HTTP, so they run on a dedicated pool sized for waiting
//! rather than on rayon's global CPU-sized pool.

use crate::db::models::RecipeIngredient;
use crate::error::{Error, Result};
use crate::remote::{IngredientCatalog, IngredientProjection};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use super::dto::{RecipeIngredientRequest, RecipeIngredientResponse};

/// Worker threads shared by every request's ingredient lookups
pub const LOOKUP_THREADS: usize = 32;

/// Build the pool ingredient lookups fan out on
pub fn lookup_pool(threads: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("ingredient-lookup-{i}"))
        .build()
        .map_err(|e| Error::InitError(format!("Failed to create lookup pool: {e}")))
}

/// A requested line that passed validation, with what the catalog said about it
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    pub stored: RecipeIngredient,
    pub ingredient: IngredientProjection,
}

impl ResolvedLine {
    pub fn to_response(&self) -> RecipeIngredientResponse {
        to_response(&self.stored, &self.ingredient)
    }
}

/// Check that a requested line's ingredient exists
///
/// The stored line is the request verbatim. Its unit is not checked against
/// the ingredient's declared units.
pub fn resolve_for_write(
    catalog: &dyn IngredientCatalog,
    line: &RecipeIngredientRequest,
) -> Result<ResolvedLine> {
    let ingredient = catalog.ingredient(&line.ingredient_ref)?;

    if !ingredient.units.is_empty() && !ingredient.units.contains(&line.unit) {
        debug!(
            "Unit '{}' is not among the declared units {:?} of ingredient {}",
            line.unit, ingredient.units, ingredient.id
        );
    }

    Ok(ResolvedLine {
        stored: RecipeIngredient::new(line.ingredient_ref.clone(), line.quantity, line.unit.clone()),
        ingredient,
    })
}

/// Turn a stored line into a response line
pub fn resolve_for_read(
    catalog: &dyn IngredientCatalog,
    line: &RecipeIngredient,
) -> Result<RecipeIngredientResponse> {
    let ingredient = catalog.ingredient(&line.ingredient_ref)?;
    Ok(to_response(line, &ingredient))
}

/// Resolve every requested line; output order matches input order
///
/// If several lines fail, the error of the earliest one is returned.
pub fn resolve_all_for_write(
    pool: &ThreadPool,
    catalog: &dyn IngredientCatalog,
    lines: &[RecipeIngredientRequest],
) -> Result<Vec<ResolvedLine>> {
    let results: Vec<Result<ResolvedLine>> = pool.install(|| {
        lines
            .par_iter()
            .map(|line| resolve_for_write(catalog, line))
            .collect()
    });

    results.into_iter().collect()
}

/// Resolve every stored line; output order matches stored order
pub fn resolve_all_for_read(
    pool: &ThreadPool,
    catalog: &dyn IngredientCatalog,
    lines: &[RecipeIngredient],
) -> Result<Vec<RecipeIngredientResponse>> {
    let results: Vec<Result<RecipeIngredientResponse>> = pool.install(|| {
        lines
            .par_iter()
            .map(|line| resolve_for_read(catalog, line))
            .collect()
    });

    results.into_iter().collect()
}

fn to_response(line: &RecipeIngredient, ingredient: &IngredientProjection) -> RecipeIngredientResponse {
    RecipeIngredientResponse {
        ingredient_ref: line.ingredient_ref.clone(),
        name: ingredient.name.clone(),
        quantity: line.quantity,
        unit: line.unit.clone(),
    }
}
