//! Runtime settings from the environment and config file

use anyhow::{Context, Result};
use std::env;

use dresscast_config::AppConfig;
use dresscast_core::Thresholds;
use dresscast_fetch::Location;

/// Mail credentials and recipient from environment variables
///
/// Secrets never live in the config file. RECIPIENT_EMAIL falls back to the
/// sender address, matching the single-user deployment.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub sender: String,
    pub app_password: String,
    pub recipient: String,
}

impl MailSettings {
    /// Load mail settings from environment variables
    pub fn from_env() -> Result<Self> {
        let sender =
            env::var("SENDER_EMAIL").context("SENDER_EMAIL environment variable not set")?;
        let app_password = env::var("SENDER_APP_PASSWORD")
            .context("SENDER_APP_PASSWORD environment variable not set")?;
        let recipient = env::var("RECIPIENT_EMAIL").unwrap_or_else(|_| sender.clone());

        Ok(Self {
            sender,
            app_password,
            recipient,
        })
    }
}

/// Aggregation thresholds from the config file, defaults for unset fields
pub fn thresholds_from(config: &AppConfig) -> Thresholds {
    let defaults = Thresholds::default();
    let section = config.thresholds.as_ref();
    Thresholds {
        rain_mm: section.and_then(|t| t.rain_mm).unwrap_or(defaults.rain_mm),
        heavy_rain_mm: section
            .and_then(|t| t.heavy_rain_mm)
            .unwrap_or(defaults.heavy_rain_mm),
        wind_moderate_kmh: section
            .and_then(|t| t.wind_moderate_kmh)
            .unwrap_or(defaults.wind_moderate_kmh),
        wind_strong_kmh: section
            .and_then(|t| t.wind_strong_kmh)
            .unwrap_or(defaults.wind_strong_kmh),
    }
}

/// Forecast location from the config file
pub fn location_from(config: &AppConfig) -> Location {
    Location {
        latitude: config.latitude(),
        longitude: config.longitude(),
        timezone: config.timezone(),
    }
}
