#![forbid(unsafe_code)]

mod error;
mod recipes;

pub use error::StoreError;

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE: &str = "galley.db";

/// SQLite-backed recipe read store. One store owns one connection; reads are
/// synchronous and independent stores may be used concurrently.
#[derive(Debug)]
pub struct RecipeStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl RecipeStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let conn = Connection::open(storage_dir.join(DB_FILE))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS recipes (
          id INTEGER PRIMARY KEY,
          title TEXT,
          created_at_ms INTEGER
        );

        CREATE TABLE IF NOT EXISTS ingredients (
          id INTEGER PRIMARY KEY,
          name TEXT,
          created_at_ms INTEGER
        );

        CREATE TABLE IF NOT EXISTS step_ingredients (
          id INTEGER PRIMARY KEY,
          recipe_id INTEGER NOT NULL REFERENCES recipes(id),
          ingredient_id INTEGER REFERENCES ingredients(id),
          quantity REAL,
          unit TEXT,
          created_at_ms INTEGER
        );

        CREATE TABLE IF NOT EXISTS steps (
          id INTEGER PRIMARY KEY,
          recipe_id INTEGER NOT NULL REFERENCES recipes(id),
          data TEXT,
          step_number INTEGER,
          created_at_ms INTEGER
        );

        CREATE TABLE IF NOT EXISTS trigger_types (
          id INTEGER PRIMARY KEY,
          key TEXT,
          sensor_type TEXT,
          created_at_ms INTEGER
        );

        CREATE TABLE IF NOT EXISTS trigger_groups (
          id INTEGER PRIMARY KEY,
          step_id INTEGER NOT NULL REFERENCES steps(id),
          action_params TEXT,
          action_key TEXT,
          service TEXT
        );

        CREATE TABLE IF NOT EXISTS triggers (
          id INTEGER PRIMARY KEY,
          trigger_group_id INTEGER NOT NULL REFERENCES trigger_groups(id),
          trigger_type_id INTEGER REFERENCES trigger_types(id),
          action TEXT,
          action_params TEXT,
          trigger_params TEXT,
          service TEXT,
          created_at_ms INTEGER
        );

        CREATE TABLE IF NOT EXISTS utensils (
          id INTEGER PRIMARY KEY,
          name TEXT,
          created_at_ms INTEGER
        );

        CREATE TABLE IF NOT EXISTS step_utensils (
          step_id INTEGER NOT NULL REFERENCES steps(id),
          utensil_id INTEGER NOT NULL REFERENCES utensils(id),
          PRIMARY KEY (step_id, utensil_id)
        );

        CREATE INDEX IF NOT EXISTS idx_step_ingredients_recipe ON step_ingredients(recipe_id);
        CREATE INDEX IF NOT EXISTS idx_steps_recipe ON steps(recipe_id);
        CREATE INDEX IF NOT EXISTS idx_trigger_groups_step ON trigger_groups(step_id);
        CREATE INDEX IF NOT EXISTS idx_triggers_group ON triggers(trigger_group_id);
        "#,
    )?;
    Ok(())
}
