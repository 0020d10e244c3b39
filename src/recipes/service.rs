// src/recipes/service.rs

//! Recipe aggregation
//!
//! `RecipeService` turns stored skeletons into hydrated recipes and applies
//! writes after checking every foreign reference they make.
//!
//! Write path:
//! 1. resolve the caller (the author) by email
//! 2. validate the request and encode the instructions
//! 3. look up every referenced ingredient
//! 4. persist the skeleton and its lines in one transaction
//! 5. answer from the projections fetched in steps 1 and 3
//!
//! Any failure before step 4 leaves the database untouched. There is no
//! transaction spanning the remote checks and the write: an ingredient
//! deleted between steps 3 and 4 is stored anyway and shows up as a
//! not-found on the next read.
//!
//! Read path: load skeleton, fetch the author (once per recipe), fetch every
//! ingredient (once per line), decode instructions, assemble. Nothing is
//! cached between requests or between recipes.

use crate::db::{self, models::Recipe};
use crate::error::{EntityKind, Error, Result};
use crate::instructions;
use crate::remote::{IngredientCatalog, UserDirectory, UserProjection};
use rayon::ThreadPool;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use super::dto::{AuthorResponse, RecipeIngredientResponse, RecipeRequest, RecipeResponse};
use super::lines;

pub struct RecipeService {
    db_path: PathBuf,
    users: Arc<dyn UserDirectory>,
    ingredients: Arc<dyn IngredientCatalog>,
    lookup_pool: ThreadPool,
}

impl RecipeService {
    /// Create a service with [`lines::LOOKUP_THREADS`] lookup workers
    pub fn new(
        db_path: impl Into<PathBuf>,
        users: Arc<dyn UserDirectory>,
        ingredients: Arc<dyn IngredientCatalog>,
    ) -> Result<Self> {
        Self::with_lookup_threads(db_path, users, ingredients, lines::LOOKUP_THREADS)
    }

    pub fn with_lookup_threads(
        db_path: impl Into<PathBuf>,
        users: Arc<dyn UserDirectory>,
        ingredients: Arc<dyn IngredientCatalog>,
        threads: usize,
    ) -> Result<Self> {
        Ok(Self {
            db_path: db_path.into(),
            users,
            ingredients,
            lookup_pool: lines::lookup_pool(threads)?,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Create a recipe authored by the caller
    pub fn create(&self, request: &RecipeRequest, caller_email: &str) -> Result<RecipeResponse> {
        let author = self.users.user_by_email(caller_email)?;

        request.validate()?;
        let encoded = instructions::encode(&request.instructions)?;

        let resolved = lines::resolve_all_for_write(
            &self.lookup_pool,
            self.ingredients.as_ref(),
            &request.ingredients,
        )?;

        let mut recipe = Recipe::new(
            request.name.clone(),
            request.duration,
            request.amount_of_people,
            author.id.clone(),
        );
        recipe.description = request.description.clone();
        recipe.instructions = encoded;
        recipe.ingredients = resolved.iter().map(|r| r.stored.clone()).collect();

        let mut conn = self.open()?;
        let id = db::transaction(&mut conn, |tx| recipe.insert(tx))?;
        info!("Created recipe {} '{}' for user {}", id, recipe.name, author.id);

        let ingredient_lines = resolved.iter().map(lines::ResolvedLine::to_response).collect();
        assemble(&recipe, &author, ingredient_lines)
    }

    /// One recipe, fully hydrated
    pub fn get(&self, id: i64) -> Result<RecipeResponse> {
        let conn = self.open()?;
        let recipe = load(&conn, id)?;
        self.hydrate(&recipe)
    }

    /// Every stored recipe, fully hydrated
    ///
    /// A single unresolvable author or ingredient fails the whole listing.
    pub fn list_all(&self) -> Result<Vec<RecipeResponse>> {
        let conn = self.open()?;
        let recipes = Recipe::list_all(&conn)?;
        debug!("Hydrating {} recipes", recipes.len());

        recipes.iter().map(|recipe| self.hydrate(recipe)).collect()
    }

    /// Recipes authored by the caller
    pub fn list_mine(&self, caller_email: &str) -> Result<Vec<RecipeResponse>> {
        let caller = self.users.user_by_email(caller_email)?;

        let conn = self.open()?;
        let recipes = Recipe::find_by_user(&conn, &caller.id)?;
        debug!("User {} has {} recipes", caller.id, recipes.len());

        recipes.iter().map(|recipe| self.hydrate(recipe)).collect()
    }

    /// Replace a recipe's contents, ingredient lines included
    ///
    /// The caller becomes the recorded author.
    pub fn update(&self, id: i64, request: &RecipeRequest, caller_email: &str) -> Result<RecipeResponse> {
        let mut conn = self.open()?;
        let mut recipe = load(&conn, id)?;

        let author = self.users.user_by_email(caller_email)?;

        request.validate()?;
        let encoded = instructions::encode(&request.instructions)?;

        let resolved = lines::resolve_all_for_write(
            &self.lookup_pool,
            self.ingredients.as_ref(),
            &request.ingredients,
        )?;

        recipe.name = request.name.clone();
        recipe.duration = request.duration;
        recipe.amount_of_people = request.amount_of_people;
        recipe.description = request.description.clone();
        recipe.instructions = encoded;
        recipe.user_id = author.id.clone();
        recipe.ingredients = resolved.iter().map(|r| r.stored.clone()).collect();

        db::transaction(&mut conn, |tx| recipe.update(tx))?;
        info!("Updated recipe {} '{}'", id, recipe.name);

        let ingredient_lines = resolved.iter().map(lines::ResolvedLine::to_response).collect();
        assemble(&recipe, &author, ingredient_lines)
    }

    /// Delete a recipe
    ///
    /// Other services holding the id (favourites, say) aren't told.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.open()?;
        load(&conn, id)?;

        if !Recipe::delete(&conn, id)? {
            return Err(Error::not_found(EntityKind::Recipe, id.to_string()));
        }

        info!("Deleted recipe {}", id);
        Ok(())
    }

    fn open(&self) -> Result<Connection> {
        db::open(&self.db_path)
    }

    fn hydrate(&self, recipe: &Recipe) -> Result<RecipeResponse> {
        let author = self.users.user_by_id(&recipe.user_id)?;
        let ingredient_lines = lines::resolve_all_for_read(
            &self.lookup_pool,
            self.ingredients.as_ref(),
            &recipe.ingredients,
        )?;
        assemble(recipe, &author, ingredient_lines)
    }
}

fn load(conn: &Connection, id: i64) -> Result<Recipe> {
    Recipe::find_by_id(conn, id)?.ok_or_else(|| Error::not_found(EntityKind::Recipe, id.to_string()))
}

fn assemble(
    recipe: &Recipe,
    author: &UserProjection,
    ingredients: Vec<RecipeIngredientResponse>,
) -> Result<RecipeResponse> {
    let unsaved = || Error::InitError(format!("Recipe '{}' has not been saved", recipe.name));

    Ok(RecipeResponse {
        id: recipe.id.ok_or_else(unsaved)?,
        name: recipe.name.clone(),
        duration: recipe.duration,
        amount_of_people: recipe.amount_of_people,
        description: recipe.description.clone(),
        instructions: instructions::decode(&recipe.instructions),
        ingredients,
        author: AuthorResponse {
            name: author.name.clone(),
            image: author.image.clone(),
        },
        created_at: recipe.created_at.ok_or_else(unsaved)?,
        updated_at: recipe.updated_at.ok_or_else(unsaved)?,
    })
}
