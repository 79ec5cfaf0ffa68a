/// Centralized argument handling for the homework bot
///
/// Flags are read from a process-wide copy of `env::args()` so any module can
/// check them without threading a parsed struct through every call. The
/// `*_in` helpers take an explicit slice and are what tests exercise.
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Default location of the optional settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

pub fn has_arg_in(args: &[String], arg: &str) -> bool {
    args.iter().any(|a| a == arg)
}

/// Value following `flag`, e.g. `--config path.toml`
pub fn get_arg_value_in(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .filter(|value| !value.starts_with("--"))
        .cloned()
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    has_arg_in(&get_cmd_args(), arg)
}

pub fn get_arg_value(flag: &str) -> Option<String> {
    get_arg_value_in(&get_cmd_args(), flag)
}

// =============================================================================
// RUN MODES
// =============================================================================

/// Run a single poll cycle and exit
pub fn is_once_enabled() -> bool {
    has_arg("--once")
}

/// Disable the log file mirror
pub fn is_log_file_disabled() -> bool {
    has_arg("--no-log-file")
}

/// `--log-file <path>` override
pub fn log_file_override() -> Option<PathBuf> {
    get_arg_value("--log-file").map(PathBuf::from)
}

/// `--config <path>`, falling back to `config.toml`
pub fn config_path() -> PathBuf {
    get_arg_value("--config")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Whether the settings path was given explicitly (a missing file is then an error)
pub fn is_config_path_explicit() -> bool {
    get_arg_value("--config").is_some()
}

// =============================================================================
// HELP SYSTEM
// =============================================================================

/// Help text listing every flag
pub const HELP_TEXT: &str = "\
homework-bot - Practicum homework status notifier for Telegram

USAGE:
    homework-bot [FLAGS]

ENVIRONMENT (or .env):
    TOKEN_PR                  Practicum API OAuth token
    TOKEN_TM                  Telegram bot token
    CHAT_ID                   Destination chat id or @channel

CORE FLAGS:
    --config <path>           Settings file (default: config.toml)
    --once                    Run a single poll cycle and exit
    --log-file <path>         Log file path (overrides settings)
    --no-log-file             Console logging only
    --no-color                Plain console output
    --quiet, -q               Warnings and errors only
    --verbose, -v             Very detailed tracing
    --help, -h                Show this help message
    --version, -V             Show version

DEBUG FLAGS:
    --debug-all               Debug output for every tag
    --debug-api               Homework API requests
    --debug-config            Settings and credentials loading
    --debug-homework          Response validation and formatting
    --debug-poller            Poll loop decisions
    --debug-system            Startup and shutdown
    --debug-telegram          Message delivery
    --debug-external          Dependency crates (reqwest, teloxide)
    --verbose-<tag>           Verbose output for one tag (same tag names)

EXAMPLES:
    homework-bot                          # Poll every retry period
    homework-bot --once --debug-all       # One verbose cycle
    homework-bot --config prod.toml       # Custom settings
";

/// Displays the help menu with all available flags and their descriptions
pub fn print_help() {
    print!("{}", HELP_TEXT);
}

// =============================================================================
// COMMON ARGUMENT PATTERNS
// =============================================================================

pub mod patterns {
    use super::*;

    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    pub fn is_version_requested() -> bool {
        has_arg("--version") || has_arg("-V")
    }
}
