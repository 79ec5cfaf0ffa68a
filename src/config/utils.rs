/// Settings utilities - loading and validation
///
/// Settings are loaded once at startup and handed to the poller by value;
/// nothing here keeps global state.
use super::schemas::Settings;
use crate::logger::LogLevel;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Load settings from a TOML file
///
/// A missing file yields defaults unless `required` is set (the path was
/// passed explicitly with `--config`).
pub fn load_settings_from_path(path: &Path, required: bool) -> Result<Settings> {
    if !path.exists() {
        if required {
            bail!("Settings file '{}' not found", path.display());
        }
        return Ok(Settings::default());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file '{}'", path.display()))?;

    parse_settings(&contents)
        .with_context(|| format!("Failed to load settings file '{}'", path.display()))
}

/// Parse and validate a settings document
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).context("Invalid TOML")?;
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn validate_settings(settings: &Settings) -> Result<()> {
    reqwest::Url::parse(&settings.api.endpoint)
        .with_context(|| format!("api.endpoint '{}' is not a valid URL", settings.api.endpoint))?;

    if settings.api.request_timeout_secs == 0 {
        bail!("api.request_timeout_secs must be greater than zero");
    }
    if settings.poller.retry_period_secs == 0 {
        bail!("poller.retry_period_secs must be greater than zero");
    }
    if LogLevel::from_str(&settings.logging.min_level).is_none() {
        bail!("logging.min_level '{}' is not a known level", settings.logging.min_level);
    }
    if !settings.messages.status_changed.contains("{verdict}") {
        bail!("messages.status_changed must contain {{verdict}}");
    }
    Ok(())
}
