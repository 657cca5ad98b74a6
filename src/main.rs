use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info};

use recipes_bot::bot::{self, BotContext};
use recipes_bot::config::BotConfig;
use recipes_bot::db::SqliteRecipeStore;
use recipes_bot::liveness;
use recipes_bot::observability::init_tracing;
use recipes_bot::router::CommandRouter;
use recipes_bot::session::InMemorySessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().context("Failed to load configuration")?;

    init_tracing(config.log_format);

    info!("Starting Recipes Telegram Bot");
    info!(database_url = %config.database_url, "Initializing database");

    let store = SqliteRecipeStore::new(&config.database_url)?;
    store.bootstrap().await?;

    // Liveness runs on its own task and never touches bot state
    let listener = liveness::bind(config.liveness_port)
        .await
        .with_context(|| format!("Failed to bind liveness port {}", config.liveness_port))?;
    tokio::spawn(async move {
        if let Err(e) = liveness::serve(listener).await {
            error!(error = %e, "Liveness endpoint stopped");
        }
    });

    let context = Arc::new(BotContext {
        router: CommandRouter::new(store, InMemorySessionStore::new()),
        default_language: config.default_language.clone(),
    });

    let bot = Bot::new(config.bot_token);
    bot::register_commands(&bot).await?;

    bot::run(bot, context).await;

    Ok(())
}
