use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` via dotenvy).
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub request_timeout: Duration,
    pub db_pool_size: u32,
    pub db_connect_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    require("POSTGRES_USER")?,
                    require("POSTGRES_PASSWORD")?,
                    require("POSTGRES_HOST")?,
                    parse_or("POSTGRES_PORT", get("POSTGRES_PORT"), 5432u16)?,
                    require("POSTGRES_DB")?,
                )
            }
        };

        Ok(Self {
            database_url,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 8000)?,
            model_path: get("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("model.json")),
            request_timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                30,
            )?),
            db_pool_size: parse_or("DB_POOL_SIZE", get("DB_POOL_SIZE"), 10)?,
            db_connect_timeout: Duration::from_secs(parse_or(
                "DB_CONNECT_TIMEOUT_SECS",
                get("DB_CONNECT_TIMEOUT_SECS"),
                5,
            )?),
        })
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw,
        }),
    }
}
