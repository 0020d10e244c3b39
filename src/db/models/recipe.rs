// src/db/models/recipe.rs

//! Recipe skeleton model
//!
//! The skeleton is everything the recipe service stores about a recipe:
//! local fields, the encoded instruction string, the ordered ingredient
//! lines and the author's identifier. Nothing here knows whether the author
//! or the ingredients still exist.

use crate::duration::RecipeDuration;
use crate::error::{EntityKind, Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::RecipeIngredient;

const SELECT_COLUMNS: &str = "SELECT id, name, duration_secs, amount_of_people, description,
            instructions, user_id, created_at, updated_at FROM recipes";

#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: Option<i64>,
    pub name: String,
    pub duration: RecipeDuration,
    pub amount_of_people: u32,
    pub description: Option<String>,
    /// Instruction lines joined by [`crate::instructions::SEPARATOR`]
    pub instructions: String,
    /// Author identifier owned by the user service
    pub user_id: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    pub fn new(name: String, duration: RecipeDuration, amount_of_people: u32, user_id: String) -> Self {
        Self {
            id: None,
            name,
            duration,
            amount_of_people,
            description: None,
            instructions: String::new(),
            user_id,
            ingredients: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Insert the recipe and its lines
    ///
    /// Call inside a transaction: the recipe row and its lines must land
    /// together. The id and both timestamps come back from SQLite.
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        let (id, created_at, updated_at) = conn.query_row(
            "INSERT INTO recipes (name, duration_secs, amount_of_people, description, instructions, user_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, created_at, updated_at",
            params![
                &self.name,
                duration_to_sql(self.duration)?,
                self.amount_of_people,
                &self.description,
                &self.instructions,
                &self.user_id,
            ],
            |row| Ok((row.get::<_, i64>(0)?, timestamp_at(row, 1)?, timestamp_at(row, 2)?)),
        )?;

        RecipeIngredient::insert_all(conn, id, &mut self.ingredients)?;

        self.id = Some(id);
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        Ok(id)
    }

    /// Overwrite the stored recipe with this one, replacing every line
    ///
    /// `updated_at` never moves backwards, even if the wall clock does.
    /// Call inside a transaction.
    pub fn update(&mut self, conn: &Connection) -> Result<()> {
        let id = self.id.ok_or_else(|| {
            Error::InitError("Cannot update recipe without ID".to_string())
        })?;

        let stamps = conn
            .query_row(
                "UPDATE recipes
                 SET name = ?1, duration_secs = ?2, amount_of_people = ?3, description = ?4,
                     instructions = ?5, user_id = ?6,
                     updated_at = MAX(updated_at, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                 WHERE id = ?7
                 RETURNING created_at, updated_at",
                params![
                    &self.name,
                    duration_to_sql(self.duration)?,
                    self.amount_of_people,
                    &self.description,
                    &self.instructions,
                    &self.user_id,
                    id,
                ],
                |row| Ok((timestamp_at(row, 0)?, timestamp_at(row, 1)?)),
            )
            .optional()?;

        let (created_at, updated_at) =
            stamps.ok_or_else(|| Error::not_found(EntityKind::Recipe, id.to_string()))?;

        RecipeIngredient::replace_for_recipe(conn, id, &mut self.ingredients)?;

        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        Ok(())
    }

    /// Find a recipe by ID, lines included
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
        let recipe = stmt.query_row([id], Self::from_row).optional()?;

        match recipe {
            Some(recipe) => Ok(Some(recipe.with_lines(conn)?)),
            None => Ok(None),
        }
    }

    /// All recipes, oldest first
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let recipes = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        recipes.into_iter().map(|r| r.with_lines(conn)).collect()
    }

    /// Recipes written by one author, oldest first
    pub fn find_by_user(conn: &Connection, user_id: &str) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY id"))?;
        let recipes = stmt
            .query_map([user_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        recipes.into_iter().map(|r| r.with_lines(conn)).collect()
    }

    /// Delete a recipe; its lines go with it. Returns false if nothing matched.
    pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
        let removed = conn.execute("DELETE FROM recipes WHERE id = ?1", [id])?;
        Ok(removed > 0)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    fn with_lines(mut self, conn: &Connection) -> Result<Self> {
        if let Some(id) = self.id {
            self.ingredients = RecipeIngredient::find_by_recipe(conn, id)?;
        }
        Ok(self)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let duration_secs: i64 = row.get(2)?;
        let duration_secs = u64::try_from(duration_secs)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, Box::new(e)))?;

        Ok(Self {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            duration: RecipeDuration::from_secs(duration_secs),
            amount_of_people: row.get(3)?,
            description: row.get(4)?,
            instructions: row.get(5)?,
            user_id: row.get(6)?,
            ingredients: Vec::new(),
            created_at: Some(timestamp_at(row, 7)?),
            updated_at: Some(timestamp_at(row, 8)?),
        })
    }
}

fn duration_to_sql(duration: RecipeDuration) -> Result<i64> {
    i64::try_from(duration.as_secs())
        .map_err(|_| Error::Validation(format!("Duration {duration} is too long to store")))
}

fn timestamp_at(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
