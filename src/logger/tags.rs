/// Log tags identify which part of the bot produced a message.
///
/// Each tag maps to a `--debug-<key>` flag that unlocks its debug output.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Api,
    Homework,
    Telegram,
    Poller,
    /// Records forwarded from dependency crates through the `log` facade
    External(String),
}

impl LogTag {
    /// Key used by `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Homework => "homework".to_string(),
            LogTag::Telegram => "telegram".to_string(),
            LogTag::Poller => "poller".to_string(),
            LogTag::External(_) => "external".to_string(),
        }
    }

    /// Uncolored label used in the log file
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Api => "API".to_string(),
            LogTag::Homework => "HOMEWORK".to_string(),
            LogTag::Telegram => "TELEGRAM".to_string(),
            LogTag::Poller => "POLLER".to_string(),
            LogTag::External(target) => {
                // "teloxide_core::net" -> "TELOXIDE_CORE"
                let root = target.split("::").next().unwrap_or(target);
                root.to_uppercase()
            }
        }
    }

    /// All tags that have a dedicated debug flag
    pub fn all_debug_keys() -> &'static [&'static str] {
        &["system", "config", "api", "homework", "telegram", "poller", "external"]
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
