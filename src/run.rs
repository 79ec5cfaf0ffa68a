// Bot lifecycle: settings, credentials, wiring, poll loop, shutdown

use crate::{
    arguments,
    config::{check_tokens, load_settings_from_path, Credentials, Settings},
    homework::PracticumClient,
    logger::{self, LogLevel, LogTag},
    poller::{CycleOutcome, Poller},
    telegram::TelegramNotifier,
    version,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Main bot execution function
///
/// Returns only on startup failure, after a single `--once` cycle, or when a
/// shutdown signal arrives. The poll loop itself never ends.
pub async fn run_bot() -> Result<()> {
    logger::info(
        LogTag::System,
        &format!("{} starting up...", version::version_line()),
    );

    // 1. Settings (defaults when config.toml is absent)
    let config_path = arguments::config_path();
    let settings = load_settings_from_path(&config_path, arguments::is_config_path_explicit())?;
    logger::debug(
        LogTag::Config,
        &format!("Settings loaded from {}", config_path.display()),
    );

    // 2. Logging from settings
    configure_logging(&settings);

    run_with_credentials(&settings, Credentials::from_env()).await
}

/// Everything after settings: credential check, wiring, then the poll loop
pub async fn run_with_credentials(settings: &Settings, credentials: Credentials) -> Result<()> {
    // 3. Credentials
    logger::debug(LogTag::Config, &format!("Credentials: {:?}", credentials));
    if !check_tokens(&credentials) {
        return credentials
            .validate()
            .context("Token check failed, the bot cannot start");
    }

    // 4. Wire the API client and the Telegram notifier
    let client = PracticumClient::new(&settings.api, &credentials.api_token)?;
    let notifier = TelegramNotifier::from_credentials(&credentials)?;

    match notifier.probe().await {
        Ok(username) => logger::info(
            LogTag::Telegram,
            &format!("Connected to Telegram as @{}", username),
        ),
        Err(e) => logger::warning(
            LogTag::Telegram,
            &format!("Telegram token check failed, continuing anyway: {}", e),
        ),
    }

    logger::info(
        LogTag::Api,
        &format!("Polling homework statuses at {}", client.endpoint()),
    );
    let mut poller = Poller::new(client, notifier, settings);

    // 5. Single cycle mode
    if arguments::is_once_enabled() {
        let outcome = poller.poll_once().await;
        logger::info(LogTag::System, &describe_outcome(&outcome));
        return Ok(());
    }

    // 6. Poll until a shutdown signal arrives
    tokio::select! {
        _ = poller.run() => {}
        signal = wait_for_shutdown_signal() => {
            let signal = signal?;
            logger::warning(
                LogTag::System,
                &format!("Shutdown signal received ({}), stopping", signal),
            );
        }
    }

    logger::info(LogTag::System, "Homework bot shut down successfully");
    Ok(())
}

/// Apply the `[logging]` section; command-line flags win
fn configure_logging(settings: &Settings) {
    if let Some(level) = LogLevel::from_str(&settings.logging.min_level) {
        logger::apply_min_level(level);
    }

    let Some(path) = log_file_path(
        settings,
        arguments::is_log_file_disabled(),
        arguments::log_file_override(),
    ) else {
        return;
    };

    match logger::init_file(&path) {
        Ok(()) => logger::debug(
            LogTag::System,
            &format!("Logging to file {}", path.display()),
        ),
        Err(e) => logger::warning(
            LogTag::System,
            &format!(
                "Cannot open log file {}, console only: {}",
                path.display(),
                e
            ),
        ),
    }
}

/// Resolve the log file: `--no-log-file` beats `--log-file`, which beats settings
fn log_file_path(
    settings: &Settings,
    disabled: bool,
    override_path: Option<PathBuf>,
) -> Option<PathBuf> {
    if disabled {
        return None;
    }
    if override_path.is_some() {
        return override_path;
    }
    if settings.logging.file_enabled && !settings.logging.file.is_empty() {
        return Some(PathBuf::from(&settings.logging.file));
    }
    None
}

fn describe_outcome(outcome: &CycleOutcome) -> String {
    match outcome {
        CycleOutcome::Notified { delivered: true, .. } => {
            "Single cycle finished: message sent".to_string()
        }
        CycleOutcome::Notified { delivered: false, .. } => {
            "Single cycle finished: message delivery failed".to_string()
        }
        CycleOutcome::Unchanged => "Single cycle finished: nothing new".to_string(),
        CycleOutcome::Failed { error, .. } => {
            format!("Single cycle finished with {} error", error.kind())
        }
    }
}

/// Wait for a process shutdown signal and return its name
async fn wait_for_shutdown_signal() -> Result<&'static str> {
    logger::debug(LogTag::System, "Waiting for shutdown signal");

    #[cfg(unix)]
    let signal_name = {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).context("Failed to bind SIGINT")?;
        let mut sigterm = signal(SignalKind::terminate()).context("Failed to bind SIGTERM")?;
        let mut sighup = signal(SignalKind::hangup()).context("Failed to bind SIGHUP")?;

        tokio::select! {
            _ = sigint.recv() => "SIGINT",
            _ = sigterm.recv() => "SIGTERM",
            _ = sighup.recv() => "SIGHUP",
        }
    };

    #[cfg(windows)]
    let signal_name = {
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for shutdown signal")?;
        "CTRL_C"
    };

    Ok(signal_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BotError;

    fn credentials(api: &str, bot: &str, chat: &str) -> Credentials {
        Credentials {
            api_token: api.to_string(),
            bot_token: bot.to_string(),
            chat_id: chat.to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_abort_startup() {
        let err = run_with_credentials(&Settings::default(), credentials("", "123:abc", ""))
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Token check failed"));
        match err.downcast_ref::<BotError>() {
            Some(BotError::MissingCredentials { missing }) => {
                assert_eq!(missing, &vec!["TOKEN_PR".to_string(), "CHAT_ID".to_string()]);
            }
            other => panic!("expected MissingCredentials, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_chat_id_aborts_startup() {
        let err = run_with_credentials(
            &Settings::default(),
            credentials("practicum", "123:abc", "my chat"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err.downcast_ref::<BotError>(), Some(BotError::Config(_))));
    }

    #[test]
    fn test_log_file_path_precedence() {
        let mut settings = Settings::default();

        assert_eq!(
            log_file_path(&settings, false, None),
            Some(PathBuf::from("homework_bot.log"))
        );
        assert_eq!(
            log_file_path(&settings, false, Some(PathBuf::from("/tmp/bot.log"))),
            Some(PathBuf::from("/tmp/bot.log"))
        );
        assert_eq!(
            log_file_path(&settings, true, Some(PathBuf::from("/tmp/bot.log"))),
            None
        );

        settings.logging.file_enabled = false;
        assert_eq!(log_file_path(&settings, false, None), None);
    }

    #[test]
    fn test_describe_outcome() {
        assert_eq!(
            describe_outcome(&CycleOutcome::Unchanged),
            "Single cycle finished: nothing new"
        );
        let failed = CycleOutcome::Failed {
            error: BotError::UnknownStatus {
                status: "pending".to_string(),
            },
            reported: true,
        };
        assert_eq!(
            describe_outcome(&failed),
            "Single cycle finished with domain error"
        );
    }
}
