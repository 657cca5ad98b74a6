//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::debug;

use crate::localization::detect_language;
use crate::router::Inbound;

use super::ui_builder::create_keyboard;
use super::RecipeBotContext;

/// Route one inbound command or text message and send the reply
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    inbound: Inbound,
    context: Arc<RecipeBotContext>,
) -> Result<()> {
    let Some(user) = msg.from.as_ref() else {
        debug!(chat_id = %msg.chat.id, "Ignoring message without sender");
        return Ok(());
    };

    // Extract user's language code from Telegram
    let language = detect_language(user.language_code.as_deref(), &context.default_language);

    debug!(user_id = %user.id, language = %language, inbound = ?inbound, "Received message from user");

    let reply = context.router.handle(user.id, language, inbound).await?;

    bot.send_message(msg.chat.id, reply.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(create_keyboard(reply.menu, language))
        .await?;

    Ok(())
}
