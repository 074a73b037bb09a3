use crate::codeforces::api::DEFAULT_API_BASE;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub api_base: Url,
    pub handles_file: PathBuf,
    pub request_timeout: Duration,
    pub update_interval: Duration,
    pub contest_window_hours: i64,
    pub log_level: log::LevelFilter,
    pub error_log_file: PathBuf,
}

impl Config {
    /// Reads the process environment; call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let raw_base = lookup("CF_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let mut api_base = Url::parse(raw_base.trim()).map_err(|_| ConfigError::Invalid {
            key: "CF_API_BASE",
            value: raw_base.clone(),
        })?;
        // Url::join drops the last path segment unless the base ends with a slash
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }

        let request_timeout_secs: u64 = parse_or(&lookup, "CF_REQUEST_TIMEOUT_SECS", 10)?;
        let update_interval_minutes: u64 = parse_or(&lookup, "CF_UPDATE_INTERVAL_MINUTES", 30)?;
        if update_interval_minutes == 0 {
            return Err(ConfigError::Invalid {
                key: "CF_UPDATE_INTERVAL_MINUTES",
                value: "0".to_string(),
            });
        }

        Ok(Config {
            discord_token,
            api_base,
            handles_file: lookup("CF_HANDLES_FILE").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("handles.json")),
            request_timeout: Duration::from_secs(request_timeout_secs),
            update_interval: Duration::from_secs(update_interval_minutes * 60),
            contest_window_hours: parse_or(&lookup, "CF_CONTEST_WINDOW_HOURS", 48)?,
            log_level: parse_or(&lookup, "LOG_LEVEL", log::LevelFilter::Info)?,
            error_log_file: lookup("ERROR_LOG_FILE").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("emergency.log")),
        })
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
