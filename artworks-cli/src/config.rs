//! Runtime configuration from the environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use artworks_lib::DEFAULT_BASE_URL;
use artworks_lib::DEFAULT_PAGE_SIZE;
use simplelog::LevelFilter;
use thiserror::Error;

use crate::paths;

/// Configuration error type.
#[derive(Debug, Error)]
#[error("invalid {key}='{value}': {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Shell configuration.
///
/// Read from `ARTWORKS_*` environment variables. A `.env` file in the working
/// directory and `artworks.env` in the user config directory are loaded first;
/// variables already set in the environment win.
#[derive(Debug, Clone)]
pub struct Config {
    /// `ARTWORKS_API_URL`
    pub api_url: String,
    /// `ARTWORKS_PAGE_SIZE`
    pub page_size: usize,
    /// `ARTWORKS_TIMEOUT_SECS`
    pub timeout: Duration,
    /// `ARTWORKS_LOG_LEVEL`
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Loads the configuration from env files and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        if let Some(path) = paths::env_file() {
            let _ = dotenvy::from_path(path);
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("ARTWORKS_API_URL") {
            config.api_url = url;
        }
        if let Some(size) = parse_var::<usize>(&lookup, "ARTWORKS_PAGE_SIZE")? {
            if size == 0 {
                return Err(ConfigError {
                    key: "ARTWORKS_PAGE_SIZE",
                    value: size.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            config.page_size = size;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "ARTWORKS_TIMEOUT_SECS")? {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(level) = parse_var::<LevelFilter>(&lookup, "ARTWORKS_LOG_LEVEL")? {
            config.log_level = level;
        }

        Ok(config)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim().parse().map(Some).map_err(|e: T::Err| ConfigError {
        key,
        value: raw.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ARTWORKS_API_URL", "http://localhost:8080/api/v1"),
            ("ARTWORKS_PAGE_SIZE", " 25 "),
            ("ARTWORKS_TIMEOUT_SECS", "5"),
            ("ARTWORKS_LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/api/v1");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_page_size() {
        let err = Config::from_lookup(lookup(&[("ARTWORKS_PAGE_SIZE", "ten")])).unwrap_err();
        assert_eq!(err.key, "ARTWORKS_PAGE_SIZE");
        assert_eq!(err.value, "ten");

        let err = Config::from_lookup(lookup(&[("ARTWORKS_PAGE_SIZE", "0")])).unwrap_err();
        assert_eq!(err.reason, "must be at least 1");
    }

    #[test]
    fn test_invalid_log_level() {
        let err = Config::from_lookup(lookup(&[("ARTWORKS_LOG_LEVEL", "loud")])).unwrap_err();
        assert_eq!(err.key, "ARTWORKS_LOG_LEVEL");
    }
}
