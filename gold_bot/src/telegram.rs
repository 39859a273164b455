//! Telegram transport.
//!
//! Long-polls the Bot API, hands the text of every message to the
//! `CommandRouter` and sends back its reply in the same chat. Updates are
//! handled concurrently; the router's state is shared through an `Arc`.
//!
//! Subscriptions and greetings are keyed on the message author, not the
//! chat, so `/subscribe` in a group registers the person who typed it.

use std::sync::Arc;

use gold_common::command::bot_commands;
use gold_common::{Caller, CommandRouter, Reply, ReplyFormat};
use log::{error, info, warn};
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode, User};

/// Register the command menu and run the polling loop until Ctrl+C.
pub async fn run(bot: Bot, router: Arc<CommandRouter>) {
    if let Err(e) = register_bot_commands(&bot).await {
        warn!("Failed to register bot commands with Telegram: {}", e);
    }

    info!("✅ Bot started successfully");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let router = Arc::clone(&router);
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            let caller = caller_for(msg.chat.id, msg.from.as_ref());
            if let Some(reply) = router.handle(&caller, text) {
                if let Err(e) = send_reply(&bot, msg.chat.id, reply).await {
                    error!("Failed to send reply to {}: {}", msg.chat.id, e);
                }
            }

            respond(())
        }
    })
    .await;

    info!("Bot stopped");
}

#[allow(deprecated)]
async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<(), teloxide::RequestError> {
    let request = bot.send_message(chat_id, reply.text);
    match reply.format {
        // report text is unescaped legacy markdown
        ReplyFormat::Markdown => request.parse_mode(ParseMode::Markdown).await?,
        ReplyFormat::Plain => request.await?,
    };
    Ok(())
}

/// Look up the bot's own username, used to spot commands meant for other
/// bots in group chats.
pub async fn bot_username(bot: &Bot) -> Option<String> {
    match bot.get_me().await {
        Ok(me) => Some(me.username().to_string()),
        Err(e) => {
            warn!("Failed to fetch bot identity, answering every @mention: {}", e);
            None
        }
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(telegram_commands()).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}

fn telegram_commands() -> Vec<BotCommand> {
    bot_commands()
        .into_iter()
        .map(|(name, description)| BotCommand::new(name, description))
        .collect()
}

/// Identify the author of a message.
///
/// Channel posts carry no sender; the chat then stands in for the author.
fn caller_for(chat_id: ChatId, from: Option<&User>) -> Caller {
    match from {
        Some(user) => Caller::new(user.id.0 as i64, Some(user.first_name.clone())),
        None => Caller::new(chat_id.0, None),
    }
}
