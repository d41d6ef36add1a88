//! Configuration management for filing-alert.
//!
//! The configuration is a single JSON document (`configuration.json`); a
//! `.toml` file with the same keys is accepted as well. Environment variables
//! can override a few operational settings.

use crate::error::{ConfigError, ConfigResult};
use crate::types::FilingKey;
use directories::ProjectDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// File name looked up in the working directory and the platform config dir.
pub const CONFIG_FILE_NAME: &str = "configuration.json";

/// Main application configuration.
///
/// Loaded once per run and never mutated afterwards. Every field except
/// `search_urls` has a default; the mail fields are only checked when mail is
/// actually sent (see [`AppConfig::validate_mail`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lookback window in days
    pub fetch_days: u32,
    /// Filing-type key to base search URL, in document order
    pub search_urls: IndexMap<FilingKey, String>,
    /// Run Chromium without a window
    pub chrome_headless: bool,
    /// `From` address of the digest email
    pub sender_email: String,
    /// Digest recipients
    pub recipient_emails: Vec<String>,
    /// SMTP relay host
    pub smtp_server: String,
    /// SMTP relay port
    pub smtp_port: u16,
    /// Form-type filter appended to every search URL
    pub forms: String,
    /// How long to wait for the results table to render
    pub page_load_timeout_secs: u64,
    /// Base used to resolve relative filing links
    pub filing_base_url: String,
    /// Optional browser user agent override
    pub user_agent: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch_days: 200,
            search_urls: IndexMap::new(),
            chrome_headless: false,
            sender_email: String::new(),
            recipient_emails: Vec::new(),
            smtp_server: String::new(),
            smtp_port: 25,
            forms: "8-K".to_string(),
            page_load_timeout_secs: 60,
            filing_base_url: "https://www.sec.gov".to_string(),
            user_agent: None,
        }
    }
}

impl AppConfig {
    /// Load and validate configuration from `path`.
    ///
    /// Files ending in `.toml` are parsed as TOML, everything else as JSON.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&contents)
        } else {
            Self::from_json_str(&contents)
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `FILING_ALERT_HEADLESS`: Override `chrome_headless` (true/false)
    /// - `FILING_ALERT_FETCH_DAYS`: Override `fetch_days`
    /// - `FILING_ALERT_SMTP_SERVER`: Override `smtp_server`
    pub fn load_with_env(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides using `lookup` to read variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("FILING_ALERT_HEADLESS") {
            match val.parse() {
                Ok(headless) => {
                    self.chrome_headless = headless;
                    tracing::debug!("Override chrome_headless from env: {}", headless);
                }
                Err(_) => tracing::warn!("Ignoring FILING_ALERT_HEADLESS={val:?}"),
            }
        }

        if let Some(val) = lookup("FILING_ALERT_FETCH_DAYS") {
            match val.parse() {
                Ok(days) => {
                    self.fetch_days = days;
                    tracing::debug!("Override fetch_days from env: {}", days);
                }
                Err(_) => tracing::warn!("Ignoring FILING_ALERT_FETCH_DAYS={val:?}"),
            }
        }

        if let Some(val) = lookup("FILING_ALERT_SMTP_SERVER") {
            tracing::debug!("Override smtp_server from env: {}", val);
            self.smtp_server = val;
        }
    }

    /// Check the search side of the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.search_urls.is_empty() {
            return Err(invalid("search_urls", "at least one search URL is required"));
        }

        for (key, url) in &self.search_urls {
            Url::parse(url).map_err(|e| {
                invalid(&format!("search_urls.{key}"), &format!("not an absolute URL: {e}"))
            })?;
        }

        Url::parse(&self.filing_base_url)
            .map_err(|e| invalid("filing_base_url", &format!("not an absolute URL: {e}")))?;

        if self.page_load_timeout_secs == 0 {
            return Err(invalid("page_load_timeout_secs", "must be greater than zero"));
        }

        if self.forms.trim().is_empty() {
            return Err(invalid("forms", "must not be empty"));
        }

        Ok(())
    }

    /// Check the mail side of the configuration.
    pub fn validate_mail(&self) -> ConfigResult<()> {
        if self.sender_email.trim().is_empty() {
            return Err(invalid("sender_email", "is required"));
        }
        if self.recipient_emails.is_empty() {
            return Err(invalid("recipient_emails", "must not be empty"));
        }
        if self.smtp_server.trim().is_empty() {
            return Err(invalid("smtp_server", "is required"));
        }
        Ok(())
    }

    /// Base search URL for `key`.
    pub fn search_url(&self, key: &FilingKey) -> ConfigResult<&str> {
        self.search_urls
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingSearchUrl {
                key: key.to_string(),
            })
    }

    /// Configured keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &FilingKey> {
        self.search_urls.keys()
    }

    /// Results-table wait timeout.
    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    /// Locate the configuration file.
    ///
    /// An explicit path wins; otherwise `./configuration.json` if present,
    /// then `~/.config/filing-alert/configuration.json` (or platform
    /// equivalent).
    pub fn resolve_path(explicit: Option<&Path>) -> ConfigResult<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return Ok(local);
        }

        let dirs = ProjectDirs::from("com", "filing-alert", "filing-alert")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
