//! Telegram delivery for the homework bot
//!
//! The bot only ever talks to one chat, so the module is just the notifier:
//! a `Notifier` trait with a best-effort `send`, and its teloxide
//! implementation.

pub mod notifier;

pub use notifier::{parse_recipient, Notifier, TelegramNotifier};
