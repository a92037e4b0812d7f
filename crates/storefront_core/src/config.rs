use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::{fetch::RetryPolicy, pagination::DEFAULT_PAGE_SIZE};

pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products/";
pub const SETTINGS_FILE: &str = "storefront.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("catalog url '{url}' is invalid: {source}")]
    InvalidUrl { url: String, source: url::ParseError },
    #[error("catalog url '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog_url: String,
    pub page_size: usize,
    pub fetch_retry_attempts: u32,
    pub fetch_retry_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            fetch_retry_attempts: 3,
            fetch_retry_delay_ms: 500,
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    catalog_url: Option<String>,
    page_size: Option<usize>,
    fetch_retry_attempts: Option<u32>,
    fetch_retry_delay_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.fetch_retry_attempts,
            delay: Duration::from_millis(self.fetch_retry_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let parsed = Url::parse(&self.catalog_url).map_err(|source| SettingsError::InvalidUrl {
            url: self.catalog_url.clone(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SettingsError::UnsupportedScheme(self.catalog_url.clone()));
        }
        if self.page_size == 0 {
            return Err(SettingsError::Zero { field: "page_size" });
        }
        if self.fetch_retry_attempts == 0 {
            return Err(SettingsError::Zero {
                field: "fetch_retry_attempts",
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(SettingsError::Zero {
                field: "request_timeout_secs",
            });
        }
        Ok(())
    }
}

/// Defaults, then `storefront.toml` in the working directory, then the
/// process environment.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    match fs::read_to_string(path) {
        Ok(raw) => apply_file_overrides(&mut settings, &raw)?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.display().to_string(),
                source,
            })
        }
    }

    apply_env_overrides(&mut settings, env);
    settings.validate()?;
    Ok(settings)
}

pub fn apply_file_overrides(settings: &mut Settings, raw: &str) -> Result<(), SettingsError> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.catalog_url {
        settings.catalog_url = v;
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = v;
    }
    if let Some(v) = file_cfg.fetch_retry_attempts {
        settings.fetch_retry_attempts = v;
    }
    if let Some(v) = file_cfg.fetch_retry_delay_ms {
        settings.fetch_retry_delay_ms = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    Ok(())
}

pub fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    for key in ["STOREFRONT_CATALOG_URL", "APP__CATALOG_URL"] {
        if let Some(v) = env(key) {
            settings.catalog_url = v;
        }
    }
    for key in ["STOREFRONT_PAGE_SIZE", "APP__PAGE_SIZE"] {
        if let Some(v) = parsed_env(&env, key) {
            settings.page_size = v;
        }
    }
    for key in ["STOREFRONT_FETCH_RETRY_ATTEMPTS", "APP__FETCH_RETRY_ATTEMPTS"] {
        if let Some(v) = parsed_env(&env, key) {
            settings.fetch_retry_attempts = v;
        }
    }
    for key in ["STOREFRONT_FETCH_RETRY_DELAY_MS", "APP__FETCH_RETRY_DELAY_MS"] {
        if let Some(v) = parsed_env(&env, key) {
            settings.fetch_retry_delay_ms = v;
        }
    }
    for key in ["STOREFRONT_REQUEST_TIMEOUT_SECS", "APP__REQUEST_TIMEOUT_SECS"] {
        if let Some(v) = parsed_env(&env, key) {
            settings.request_timeout_secs = v;
        }
    }
}

fn parsed_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable environment override");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
