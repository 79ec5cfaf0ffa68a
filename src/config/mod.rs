//! Configuration for the homework bot
//!
//! Two sources:
//! - Secrets (`TOKEN_PR`, `TOKEN_TM`, `CHAT_ID`) from the environment or `.env`
//! - Non-secret settings from an optional TOML file, every key defaulted

pub mod credentials;
pub mod macros;
pub mod schemas;
pub mod utils;

pub use credentials::{check_tokens, Credentials, ENV_API_TOKEN, ENV_BOT_TOKEN, ENV_CHAT_ID};
pub use schemas::{ApiConfig, LoggingConfig, MessagesConfig, PollerConfig, Settings};
pub use utils::{load_settings_from_path, parse_settings, validate_settings};
