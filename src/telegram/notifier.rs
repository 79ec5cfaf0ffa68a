//! Telegram notifier for sending status messages
//!
//! `Notifier::deliver` is the raw send and may fail. `Notifier::send` is the
//! best-effort contract the poll loop uses: failures are logged and swallowed.

use crate::config::Credentials;
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, Recipient};

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send `text` to the configured chat
    async fn deliver(&self, text: &str) -> BotResult<()>;

    /// Best-effort send: never propagates a delivery failure
    ///
    /// Returns whether the message went out, for logging only.
    async fn send(&self, text: &str) -> bool {
        logger::info(LogTag::Telegram, "Sending message");
        match self.deliver(text).await {
            Ok(()) => {
                logger::debug(LogTag::Telegram, &format!("Message sent: {}", text));
                true
            }
            Err(e) => {
                logger::error(LogTag::Telegram, &format!("Message delivery failed: {}", e));
                false
            }
        }
    }
}

/// Telegram notifier bound to a single chat
pub struct TelegramNotifier {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier
    ///
    /// # Arguments
    /// * `bot_token` - Telegram bot token from @BotFather
    /// * `chat_id` - numeric chat id or `@channel` username
    pub fn new(bot_token: &str, chat_id: &str) -> BotResult<Self> {
        if bot_token.is_empty() {
            return Err(BotError::Config("Bot token is empty".to_string()));
        }

        Ok(Self {
            bot: Bot::new(bot_token),
            recipient: parse_recipient(chat_id)?,
        })
    }

    pub fn from_credentials(credentials: &Credentials) -> BotResult<Self> {
        Self::new(&credentials.bot_token, &credentials.chat_id)
    }

    /// Validate the token with getMe and return the bot username
    pub async fn probe(&self) -> BotResult<String> {
        let me = self
            .bot
            .get_me()
            .await
            .map_err(|e| BotError::Delivery(format!("getMe failed: {}", e)))?;
        Ok(me
            .user
            .username
            .clone()
            .unwrap_or_else(|| "unknown".to_string()))
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, text: &str) -> BotResult<()> {
        self.bot
            .send_message(self.recipient.clone(), text)
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;
        Ok(())
    }
}

/// Numeric ids address users and groups, `@name` addresses public channels
pub fn parse_recipient(chat_id: &str) -> BotResult<Recipient> {
    let chat_id = chat_id.trim();
    if let Ok(id) = chat_id.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }
    if chat_id.len() > 1 && chat_id.starts_with('@') {
        return Ok(Recipient::ChannelUsername(chat_id.to_string()));
    }
    Err(BotError::Config(format!(
        "Invalid chat ID '{}': expected a number or @channel",
        chat_id
    )))
}
