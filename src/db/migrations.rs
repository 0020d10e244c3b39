// src/db/migrations.rs
//! Database migration implementations
//!
//! One function per schema version, applied in order by
//! [`super::schema::migrate`].

use crate::error::Result;
use rusqlite::Connection;
use tracing::debug;

/// Initial schema - Version 1
///
/// - recipes: the locally owned skeleton, instructions packed into one column
/// - recipe_ingredients: ordered ingredient lines, owned by their recipe
///
/// Timestamps are RFC 3339 UTC strings with millisecond precision, written
/// by SQLite itself so every row agrees on one clock.
pub fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        CREATE TABLE recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            duration_secs INTEGER NOT NULL CHECK(duration_secs >= 0),
            amount_of_people INTEGER NOT NULL CHECK(amount_of_people >= 0),
            description TEXT,
            instructions TEXT NOT NULL,
            user_id TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX idx_recipes_user_id ON recipes(user_id);

        -- Lines are replaced wholesale on every write, never addressed alone
        CREATE TABLE recipe_ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recipe_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            ingredient_ref TEXT NOT NULL,
            quantity REAL NOT NULL CHECK(quantity >= 0),
            unit TEXT NOT NULL,
            UNIQUE(recipe_id, position),
            FOREIGN KEY (recipe_id) REFERENCES recipes(id) ON DELETE CASCADE
        );

        CREATE INDEX idx_recipe_ingredients_recipe ON recipe_ingredients(recipe_id);
        ",
    )?;

    Ok(())
}
