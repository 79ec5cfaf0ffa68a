/// Logger configuration derived from command-line flags and settings
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Messages above this level are dropped (Critical/Error always pass)
    pub min_level: LogLevel,
    /// Tags with debug output enabled via --debug-<tag>
    pub debug_tags: HashSet<String>,
    /// Tags with verbose output enabled via --verbose-<tag>
    pub verbose_tags: HashSet<String>,
    /// Colored console output
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            colors: true,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut guard) = LOGGER_CONFIG.write() {
        *guard = config;
    }
}

/// Apply an in-place change to the logger configuration
pub fn update_logger_config<F: FnOnce(&mut LoggerConfig)>(f: F) {
    if let Ok(mut guard) = LOGGER_CONFIG.write() {
        f(&mut guard);
    }
}

/// Build a logger configuration from an argument list
///
/// Recognized flags:
/// - `--debug-<tag>` / `--debug-all`
/// - `--verbose`, `-v`, `--verbose-<tag>`
/// - `--quiet`, `-q` (warnings and failures only)
/// - `--no-color`
pub fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    let debug_all = arguments::has_arg_in(args, "--debug-all");
    for key in LogTag::all_debug_keys() {
        if debug_all || arguments::has_arg_in(args, &format!("--debug-{}", key)) {
            config.debug_tags.insert(key.to_string());
        }
        if arguments::has_arg_in(args, &format!("--verbose-{}", key)) {
            config.verbose_tags.insert(key.to_string());
        }
    }

    if !config.debug_tags.is_empty() || !config.verbose_tags.is_empty() {
        config.min_level = LogLevel::Debug;
    }
    if !config.verbose_tags.is_empty()
        || arguments::has_arg_in(args, "--verbose")
        || arguments::has_arg_in(args, "-v")
    {
        config.min_level = LogLevel::Verbose;
    }
    if arguments::has_arg_in(args, "--quiet") || arguments::has_arg_in(args, "-q") {
        config.min_level = LogLevel::Warning;
    }
    if arguments::has_arg_in(args, "--no-color") {
        config.colors = false;
    }

    config
}

/// Apply `[logging] min_level` unless flags already changed the level
///
/// Debug and verbose from settings switch on debug output for every tag, the
/// same as `--debug-all`.
pub fn apply_settings_level(config: &mut LoggerConfig, level: LogLevel) {
    let flags_set_level = !config.debug_tags.is_empty()
        || !config.verbose_tags.is_empty()
        || config.min_level != LogLevel::Info;
    if flags_set_level {
        return;
    }

    config.min_level = level;
    if level >= LogLevel::Debug {
        config
            .debug_tags
            .extend(LogTag::all_debug_keys().iter().map(|key| key.to_string()));
    }
}

/// Initialize the global logger configuration from process arguments
pub fn init_from_args() {
    let args = arguments::get_cmd_args();
    set_logger_config(config_from_args(&args));
}

pub fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.debug_tags.contains(&tag.to_debug_key())
}

pub fn is_verbose_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.verbose_tags.contains(&tag.to_debug_key())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::core::should_log;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_is_info() {
        let config = config_from_args(&args(&["homework-bot"]));
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.debug_tags.is_empty());
    }

    #[test]
    fn test_debug_flag_enables_single_tag() {
        let config = config_from_args(&args(&["homework-bot", "--debug-poller"]));
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(is_debug_enabled_for_tag(&config, &LogTag::Poller));
        assert!(!is_debug_enabled_for_tag(&config, &LogTag::Api));
    }

    #[test]
    fn test_debug_all_enables_every_tag() {
        let config = config_from_args(&args(&["homework-bot", "--debug-all"]));
        assert!(is_debug_enabled_for_tag(&config, &LogTag::Telegram));
        assert!(is_debug_enabled_for_tag(&config, &LogTag::Homework));
    }

    #[test]
    fn test_settings_debug_level_shows_debug_lines() {
        let mut config = config_from_args(&args(&["homework-bot"]));
        apply_settings_level(&mut config, LogLevel::Debug);

        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(should_log(&config, &LogTag::Poller, LogLevel::Debug));
        assert!(should_log(&config, &LogTag::Api, LogLevel::Debug));
        assert!(!should_log(&config, &LogTag::Api, LogLevel::Verbose));
    }

    #[test]
    fn test_settings_level_does_not_override_flags() {
        let mut quiet = config_from_args(&args(&["homework-bot", "--quiet"]));
        apply_settings_level(&mut quiet, LogLevel::Debug);
        assert_eq!(quiet.min_level, LogLevel::Warning);
        assert!(quiet.debug_tags.is_empty());

        let mut single = config_from_args(&args(&["homework-bot", "--debug-api"]));
        apply_settings_level(&mut single, LogLevel::Warning);
        assert_eq!(single.min_level, LogLevel::Debug);
        assert!(!should_log(&single, &LogTag::Poller, LogLevel::Debug));
    }

    #[test]
    fn test_settings_warning_level_hides_info() {
        let mut config = config_from_args(&args(&["homework-bot"]));
        apply_settings_level(&mut config, LogLevel::Warning);
        assert!(!should_log(&config, &LogTag::System, LogLevel::Info));
    }

    #[test]
    fn test_quiet_wins_over_debug() {
        let config = config_from_args(&args(&["homework-bot", "--debug-api", "-q"]));
        assert_eq!(config.min_level, LogLevel::Warning);
    }
}
