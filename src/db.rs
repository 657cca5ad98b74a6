//! # Recipe Store Module
//!
//! Read access to the `recipes` table of the local SQLite datastore.
//! Every operation opens its own connection, runs a single statement and
//! closes the connection again.

use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, FromRow};
use tracing::{debug, info};

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
}

/// A recipe as supplied to the bulk loader, before an id is assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
}

/// Read operations the router needs from the datastore
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// One recipe picked uniformly at random, or `None` when the store is empty
    async fn fetch_random(&self) -> Result<Option<Recipe>>;

    /// Every recipe whose ingredients contain `term`, ignoring case, in row order.
    /// An empty term matches everything.
    async fn search_by_ingredient(&self, term: &str) -> Result<Vec<Recipe>>;
}

/// Initialize the database schema
pub async fn init_database_schema(conn: &mut SqliteConnection) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY,
            title TEXT,
            ingredients TEXT,
            instructions TEXT
        )",
    )
    .execute(&mut *conn)
    .await
    .context("Failed to create recipes table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Insert a batch of recipes in one transaction, returning how many were written.
///
/// Only the `init-db` loader calls this; the bot never writes.
pub async fn import_recipes(conn: &mut SqliteConnection, recipes: &[NewRecipe]) -> Result<usize> {
    info!(count = recipes.len(), "Importing recipes");

    let mut tx = conn.begin().await.context("Failed to start import transaction")?;
    for recipe in recipes {
        sqlx::query("INSERT INTO recipes (title, ingredients, instructions) VALUES (?1, ?2, ?3)")
            .bind(&recipe.title)
            .bind(&recipe.ingredients)
            .bind(&recipe.instructions)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert recipe '{}'", recipe.title))?;
    }
    tx.commit().await.context("Failed to commit import transaction")?;

    Ok(recipes.len())
}

/// Case-insensitive substring test used by ingredient search
pub fn ingredients_match(ingredients: &str, term: &str) -> bool {
    ingredients.to_lowercase().contains(&term.to_lowercase())
}

/// SQLite-backed recipe store
#[derive(Debug, Clone)]
pub struct SqliteRecipeStore {
    options: SqliteConnectOptions,
}

impl SqliteRecipeStore {
    /// Build a store for a `sqlite:` URL or a plain file path
    pub fn new(database_url: &str) -> Result<Self> {
        let url = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite://{database_url}")
        };
        let options = SqliteConnectOptions::from_str(&url)
            .with_context(|| format!("Invalid database URL: {database_url}"))?
            .create_if_missing(true);
        Ok(Self { options })
    }

    /// Open a fresh connection to the datastore
    pub async fn connect(&self) -> Result<SqliteConnection> {
        SqliteConnection::connect_with(&self.options)
            .await
            .context("Failed to open recipe database")
    }

    /// Create the schema if it does not exist yet
    pub async fn bootstrap(&self) -> Result<()> {
        let mut conn = self.connect().await?;
        init_database_schema(&mut conn).await?;
        conn.close().await.context("Failed to close recipe database")?;
        Ok(())
    }
}

#[async_trait]
impl RecipeStore for SqliteRecipeStore {
    async fn fetch_random(&self) -> Result<Option<Recipe>> {
        let mut conn = self.connect().await?;

        let recipe = sqlx::query_as::<_, Recipe>(
            "SELECT id, title, ingredients, instructions FROM recipes ORDER BY RANDOM() LIMIT 1",
        )
        .fetch_optional(&mut conn)
        .await
        .context("Failed to fetch random recipe")?;

        conn.close().await.context("Failed to close recipe database")?;

        debug!(found = recipe.is_some(), "Random recipe query completed");
        Ok(recipe)
    }

    async fn search_by_ingredient(&self, term: &str) -> Result<Vec<Recipe>> {
        let mut conn = self.connect().await?;

        // SQLite's LOWER() only folds ASCII, so case folding happens here
        // to keep Cyrillic ingredient lists searchable.
        let rows = sqlx::query_as::<_, Recipe>(
            "SELECT id, title, ingredients, instructions FROM recipes ORDER BY id",
        )
        .fetch_all(&mut conn)
        .await
        .context("Failed to search recipes")?;

        conn.close().await.context("Failed to close recipe database")?;

        let matches: Vec<Recipe> = rows
            .into_iter()
            .filter(|recipe| ingredients_match(&recipe.ingredients, term))
            .collect();

        info!(term = %term, matches = matches.len(), "Ingredient search completed");
        Ok(matches)
    }
}
