//! Creates the recipe table and optionally bulk-loads recipes from JSON.
//!
//! Usage: `init-db [recipes.json]`. The JSON file holds an array of
//! `{"title", "ingredients", "instructions"}` objects.

use anyhow::{Context, Result};
use sqlx::Connection;
use std::env;
use std::fs;
use tracing::info;

use recipes_bot::config::{LogFormat, DEFAULT_DATABASE_URL};
use recipes_bot::db::{import_recipes, init_database_schema, NewRecipe, SqliteRecipeStore};
use recipes_bot::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing(LogFormat::Text);

    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let store = SqliteRecipeStore::new(&database_url)?;
    let mut conn = store.connect().await?;

    init_database_schema(&mut conn).await?;
    info!(database_url = %database_url, "Database file is ready");

    if let Some(path) = env::args().nth(1) {
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {path}"))?;
        let recipes: Vec<NewRecipe> =
            serde_json::from_str(&content).with_context(|| format!("Invalid recipe JSON in {path}"))?;
        let imported = import_recipes(&mut conn, &recipes).await?;
        info!(imported = imported, path = %path, "Recipes imported");
    }

    conn.close().await.context("Failed to close recipe database")?;
    Ok(())
}
