use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    pub rain_mm: Option<f64>,
    pub heavy_rain_mm: Option<f64>,
    pub wind_moderate_kmh: Option<f64>,
    pub wind_strong_kmh: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_relay: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub location: Option<LocationConfig>,
    pub store: Option<StoreConfig>,
    pub thresholds: Option<ThresholdsConfig>,
    pub email: Option<EmailConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from DRESSCAST_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("DRESSCAST_CONFIG").unwrap_or_else(|_| "dresscast.toml".to_string());
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path; missing files mean defaults
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let cfg = if Path::new(path).exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Forecast latitude (default: Berlin)
    pub fn latitude(&self) -> f64 {
        self.location
            .as_ref()
            .and_then(|l| l.latitude)
            .unwrap_or(52.5244)
    }

    /// Forecast longitude (default: Berlin)
    pub fn longitude(&self) -> f64 {
        self.location
            .as_ref()
            .and_then(|l| l.longitude)
            .unwrap_or(13.4105)
    }

    /// IANA timezone for the forecast request (default Europe/Berlin)
    pub fn timezone(&self) -> String {
        self.location
            .as_ref()
            .and_then(|l| l.timezone.clone())
            .unwrap_or_else(|| "Europe/Berlin".to_string())
    }

    /// SQLite file for the sample cache (default dresscast.db)
    pub fn store_path(&self) -> String {
        self.store
            .as_ref()
            .and_then(|s| s.path.clone())
            .unwrap_or_else(|| "dresscast.db".to_string())
    }

    /// SMTP relay host (default smtp.gmail.com); credentials come from the
    /// environment, never from this file
    pub fn smtp_relay(&self) -> String {
        self.email
            .as_ref()
            .and_then(|e| e.smtp_relay.clone())
            .unwrap_or_else(|| "smtp.gmail.com".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_location_is_berlin() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.latitude(), 52.5244);
        assert_eq!(cfg.longitude(), 13.4105);
        assert_eq!(cfg.timezone(), "Europe/Berlin");
    }

    #[test]
    fn default_store_and_relay() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.store_path(), "dresscast.db");
        assert_eq!(cfg.smtp_relay(), "smtp.gmail.com");
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [location]
            latitude = 48.2082
            longitude = 16.3738

            [thresholds]
            rain_mm = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(cfg.latitude(), 48.2082);
        assert_eq!(cfg.timezone(), "Europe/Berlin");
        assert_eq!(cfg.thresholds.as_ref().unwrap().rain_mm, Some(0.5));
        assert!(cfg
            .thresholds
            .as_ref()
            .unwrap()
            .wind_strong_kmh
            .is_none());
    }
}
