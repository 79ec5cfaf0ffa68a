//! Secrets read from the environment
//!
//! `.env` is loaded by the binary before `Credentials::from_env` runs, so a
//! local file and real environment variables behave the same.

use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};

/// Practicum API OAuth token
pub const ENV_API_TOKEN: &str = "TOKEN_PR";
/// Telegram bot token
pub const ENV_BOT_TOKEN: &str = "TOKEN_TM";
/// Destination chat id (numeric) or @channel username
pub const ENV_CHAT_ID: &str = "CHAT_ID";

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub bot_token: String,
    pub chat_id: String,
}

// Tokens never go through Debug output
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &mask(&self.api_token))
            .field("bot_token", &mask(&self.bot_token))
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "***"
    }
}

impl Credentials {
    /// Read the three secrets from the process environment
    ///
    /// Unset variables become empty strings; `check_tokens` decides.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the secrets through an arbitrary lookup (tests inject a map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).unwrap_or_default();
        Self {
            api_token: read(ENV_API_TOKEN),
            bot_token: read(ENV_BOT_TOKEN),
            chat_id: read(ENV_CHAT_ID),
        }
    }

    /// Names of the variables that are missing or empty
    pub fn missing(&self) -> Vec<String> {
        [
            (ENV_API_TOKEN, &self.api_token),
            (ENV_BOT_TOKEN, &self.bot_token),
            (ENV_CHAT_ID, &self.chat_id),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    /// Ok only if every secret is present
    pub fn validate(&self) -> BotResult<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BotError::MissingCredentials { missing })
        }
    }
}

/// True only if all three credential strings are non-empty
///
/// Each missing variable gets its own critical log line.
pub fn check_tokens(credentials: &Credentials) -> bool {
    let missing = credentials.missing();
    for name in &missing {
        logger::critical(
            LogTag::Config,
            &format!("Required environment variable {} is missing or empty", name),
        );
    }
    missing.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_all_present() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("TOKEN_PR", "practicum"),
            ("TOKEN_TM", "123:abc"),
            ("CHAT_ID", "42"),
        ]));
        assert!(check_tokens(&creds));
        assert!(creds.validate().is_ok());
    }

    #[test]
    fn test_any_empty_fails() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("TOKEN_PR", "practicum"),
            ("TOKEN_TM", ""),
            ("CHAT_ID", "42"),
        ]));
        assert!(!check_tokens(&creds));
        assert_eq!(creds.missing(), vec!["TOKEN_TM".to_string()]);
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let creds = Credentials::from_lookup(lookup_from(&[
            ("TOKEN_PR", "   "),
            ("TOKEN_TM", "123:abc"),
            ("CHAT_ID", "42"),
        ]));
        assert!(!check_tokens(&creds));
    }

    #[test]
    fn test_missing_variables_reported() {
        let creds = Credentials::from_lookup(lookup_from(&[("TOKEN_TM", "123:abc")]));
        match creds.validate() {
            Err(BotError::MissingCredentials { missing }) => {
                assert_eq!(missing, vec!["TOKEN_PR".to_string(), "CHAT_ID".to_string()]);
            }
            other => panic!("expected MissingCredentials, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_masks_tokens() {
        let creds = Credentials {
            api_token: "secret-api".to_string(),
            bot_token: "secret-bot".to_string(),
            chat_id: "42".to_string(),
        };
        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("42"));
    }
}
