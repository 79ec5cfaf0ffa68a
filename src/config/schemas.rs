/// Settings schemas - every non-secret tunable, defined once with its default
///
/// Each struct is defined using the config_struct! macro which provides:
/// - Single-source definition
/// - Embedded defaults
/// - Serde support with per-field defaults
use crate::config_struct;
use crate::homework::HomeworkStatus;

// ============================================================================
// HOMEWORK API
// ============================================================================

config_struct! {
    /// Homework status API endpoint
    pub struct ApiConfig {
        endpoint: String = "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string(),
        /// Whole-request timeout; a timeout counts as "endpoint unavailable"
        request_timeout_secs: u64 = 30,
    }
}

// ============================================================================
// POLL LOOP
// ============================================================================

config_struct! {
    /// Poll loop timing and failure reporting
    pub struct PollerConfig {
        /// Fixed sleep between cycles, in seconds
        retry_period_secs: u64 = 600,
        /// Relay cycle failures to the chat (deduplicated like status messages)
        notify_failures: bool = true,
    }
}

// ============================================================================
// MESSAGES
// ============================================================================

config_struct! {
    /// Chat message templates and the verdict table
    ///
    /// `status_changed` accepts `{name}` and `{verdict}`, `failure` accepts `{error}`.
    pub struct MessagesConfig {
        status_changed: String = "Изменился статус проверки работы \"{name}\". {verdict}".to_string(),
        empty_list: String = "Список работ пуст".to_string(),
        failure: String = "Сбой в работе программы: {error}".to_string(),
        approved: String = "Работа проверена: ревьюеру всё понравилось. Ура!".to_string(),
        reviewing: String = "Работа взята на проверку ревьюером.".to_string(),
        rejected: String = "Работа проверена: у ревьюера есть замечания.".to_string(),
    }
}

impl MessagesConfig {
    /// Verdict sentence for a review status
    pub fn verdict(&self, status: HomeworkStatus) -> &str {
        match status {
            HomeworkStatus::Approved => &self.approved,
            HomeworkStatus::Reviewing => &self.reviewing,
            HomeworkStatus::Rejected => &self.rejected,
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

config_struct! {
    /// Log file mirror and default verbosity
    pub struct LoggingConfig {
        file_enabled: bool = true,
        /// Overwritten on every start
        file: String = "homework_bot.log".to_string(),
        /// critical, error, warning, info, debug or verbose
        min_level: String = "info".to_string(),
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    /// Root settings document (config.toml)
    pub struct Settings {
        api: ApiConfig = ApiConfig::default(),
        poller: PollerConfig = PollerConfig::default(),
        messages: MessagesConfig = MessagesConfig::default(),
        logging: LoggingConfig = LoggingConfig::default(),
    }
}
