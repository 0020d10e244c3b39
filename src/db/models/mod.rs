// src/db/models/mod.rs

//! Data models for the recipe service database
//!
//! Plain structs mapped onto the `recipes` and `recipe_ingredients` tables,
//! with methods for creating, reading, updating and deleting records.

mod recipe;
mod recipe_ingredient;

pub use recipe::Recipe;
pub use recipe_ingredient::RecipeIngredient;
