//! Bot module for handling Telegram interactions
//!
//! - `message_handler`: turns incoming messages into router calls and sends replies
//! - `ui_builder`: creates the reply keyboards

pub mod message_handler;
pub mod ui_builder;

use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;

use crate::db::SqliteRecipeStore;
use crate::router::{Command, CommandRouter, Inbound};
use crate::session::InMemorySessionStore;

pub use message_handler::message_handler;
pub use ui_builder::{create_keyboard, create_primary_keyboard, create_search_keyboard};

/// Shared state handed to every handler invocation
pub struct BotContext<R, S> {
    pub router: CommandRouter<R, S>,
    pub default_language: String,
}

pub type RecipeBotContext = BotContext<SqliteRecipeStore, InMemorySessionStore>;

/// Publish the command list shown in Telegram's menu
pub async fn register_commands(bot: &Bot) -> Result<()> {
    bot.set_my_commands(Command::bot_commands())
        .await
        .context("Failed to register bot commands")?;
    info!("Bot commands registered");
    Ok(())
}

/// Run the long-polling dispatcher until Ctrl-C
pub async fn run(bot: Bot, context: Arc<RecipeBotContext>) {
    let command_context = Arc::clone(&context);
    let text_context = Arc::clone(&context);

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                    let context = Arc::clone(&command_context);
                    async move { message_handler(bot, msg, Inbound::Command(cmd), context).await }
                }),
        )
        .branch(
            Update::filter_message()
                .filter_map(|msg: Message| msg.text().map(str::to_owned))
                .endpoint(move |bot: Bot, msg: Message, text: String| {
                    let context = Arc::clone(&text_context);
                    async move { message_handler(bot, msg, Inbound::Text(text), context).await }
                }),
        );

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, handler)
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
