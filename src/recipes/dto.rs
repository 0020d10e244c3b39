// src/recipes/dto.rs

//! Request and response shapes for recipe operations
//!
//! Field names are camelCase on the wire to match the rest of the services.

use crate::duration::RecipeDuration;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe as submitted for create or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub name: String,
    pub duration: RecipeDuration,
    pub amount_of_people: u32,
    #[serde(default)]
    pub description: Option<String>,
    pub instructions: Vec<String>,
    pub ingredients: Vec<RecipeIngredientRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientRequest {
    #[serde(alias = "id")]
    pub ingredient_ref: String,
    pub quantity: f64,
    pub unit: String,
}

impl RecipeRequest {
    /// Reject requests that could never be stored faithfully
    ///
    /// Instruction lines are checked separately by the codec.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Name is required".to_string()));
        }

        if self.instructions.is_empty() {
            return Err(Error::Validation("At least one instruction is required".to_string()));
        }

        for (i, line) in self.ingredients.iter().enumerate() {
            if line.ingredient_ref.is_empty() {
                return Err(Error::Validation(format!(
                    "Ingredient {i} has no ingredient reference"
                )));
            }
            if !line.quantity.is_finite() || line.quantity < 0.0 {
                return Err(Error::Validation(format!(
                    "Ingredient {i} has invalid quantity {}",
                    line.quantity
                )));
            }
        }

        Ok(())
    }
}

/// A fully hydrated recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: i64,
    pub name: String,
    pub duration: RecipeDuration,
    pub amount_of_people: u32,
    pub description: Option<String>,
    pub instructions: Vec<String>,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientResponse {
    pub ingredient_ref: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// The parts of the author a recipe page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub name: String,
    pub image: Option<String>,
}
