// src/services/notifier.rs

//! Telegram announcement delivery.
//!
//! One outbound message per new post, sent synchronously in order and
//! awaited before the next. Credentials come from the environment.

use teloxide::Bot;
use teloxide::payloads::SendMessageSetters;
use teloxide::requests::{Request, Requester};
use teloxide::types::{ChatId, ParseMode, Recipient};

use crate::error::Result;
use crate::models::{HeaderRule, Post};

/// Environment variable holding the bot credential.
const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Environment variable holding the destination chat identifier.
const CHAT_ID_VAR: &str = "CHAT_ID";

/// Sends per-post announcements to a fixed Telegram chat.
pub struct Notifier {
    bot: Bot,
    chat: Recipient,
}

impl Notifier {
    /// Build a notifier from `BOT_TOKEN` and `CHAT_ID`.
    ///
    /// Missing values are not fatal here: the Telegram API rejects the
    /// first send instead, which the run logs and survives. The rest of
    /// the pipeline (fetch, diff, save) is unaffected.
    pub fn from_env() -> Self {
        let token = std::env::var(BOT_TOKEN_VAR).unwrap_or_default();
        let chat_id = std::env::var(CHAT_ID_VAR).unwrap_or_default();

        if token.is_empty() {
            log::warn!("{} is not set; deliveries will fail", BOT_TOKEN_VAR);
        }
        if chat_id.is_empty() {
            log::warn!("{} is not set; deliveries will fail", CHAT_ID_VAR);
        }

        Self::new(token, &chat_id)
    }

    pub fn new(token: impl Into<String>, chat_id: &str) -> Self {
        Self {
            bot: Bot::new(token),
            chat: parse_chat(chat_id),
        }
    }

    /// Announce a single post, awaiting delivery to completion.
    pub async fn announce(&self, post: &Post, rule: &HeaderRule) -> Result<()> {
        self.bot
            .send_message(self.chat.clone(), format_message(post, rule))
            .parse_mode(ParseMode::Html)
            .send()
            .await?;
        Ok(())
    }
}

/// Numeric identifiers address chats directly, anything else is passed
/// through as a channel username.
fn parse_chat(raw: &str) -> Recipient {
    match raw.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(raw.to_string()),
    }
}

/// Build the announcement text: emoji header line, bold title line, and a
/// link line behind a link glyph.
pub fn format_message(post: &Post, rule: &HeaderRule) -> String {
    format!(
        "{} <b>{}</b>\n\n<b>{}</b>\n\n🔗 {}",
        rule.emoji, rule.header, post.title, post.link
    )
}
