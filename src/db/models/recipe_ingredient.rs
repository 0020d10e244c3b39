// src/db/models/recipe_ingredient.rs

//! Ingredient lines of a stored recipe
//!
//! A line is a foreign ingredient reference plus a locally owned quantity
//! and unit. Lines belong to their recipe: they are written wholesale with
//! it, ordered by `position`, and deleted with it.

use crate::error::Result;
use rusqlite::{Connection, Row, params};

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub id: Option<i64>,
    pub recipe_id: Option<i64>,
    pub position: u32,
    /// Identifier owned by the ingredient service
    pub ingredient_ref: String,
    pub quantity: f64,
    /// Free text, not checked against the ingredient's declared units
    pub unit: String,
}

impl RecipeIngredient {
    pub fn new(ingredient_ref: String, quantity: f64, unit: String) -> Self {
        Self {
            id: None,
            recipe_id: None,
            position: 0,
            ingredient_ref,
            quantity,
            unit,
        }
    }

    /// Insert this line under `recipe_id` at `position`
    pub fn insert(&mut self, conn: &Connection, recipe_id: i64, position: u32) -> Result<i64> {
        conn.execute(
            "INSERT INTO recipe_ingredients (recipe_id, position, ingredient_ref, quantity, unit)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![recipe_id, position, &self.ingredient_ref, self.quantity, &self.unit],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        self.recipe_id = Some(recipe_id);
        self.position = position;
        Ok(id)
    }

    /// Insert `lines` in slice order, numbering positions from zero
    pub fn insert_all(conn: &Connection, recipe_id: i64, lines: &mut [Self]) -> Result<()> {
        for (position, line) in (0u32..).zip(lines.iter_mut()) {
            line.insert(conn, recipe_id, position)?;
        }
        Ok(())
    }

    /// Drop every line of a recipe and write `lines` in their place
    pub fn replace_for_recipe(conn: &Connection, recipe_id: i64, lines: &mut [Self]) -> Result<()> {
        Self::delete_for_recipe(conn, recipe_id)?;
        Self::insert_all(conn, recipe_id, lines)
    }

    /// All lines of a recipe, in stored order
    pub fn find_by_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, recipe_id, position, ingredient_ref, quantity, unit
             FROM recipe_ingredients WHERE recipe_id = ?1 ORDER BY position",
        )?;

        let lines = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(lines)
    }

    pub fn delete_for_recipe(conn: &Connection, recipe_id: i64) -> Result<usize> {
        let removed = conn.execute(
            "DELETE FROM recipe_ingredients WHERE recipe_id = ?1",
            [recipe_id],
        )?;
        Ok(removed)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            recipe_id: Some(row.get(1)?),
            position: row.get(2)?,
            ingredient_ref: row.get(3)?,
            quantity: row.get(4)?,
            unit: row.get(5)?,
        })
    }
}
