use std::env;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable '{0}'")]
    Missing(&'static str),

    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_pool_max_size: u32,
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&get, "PORT", 8080)?;
        let db_pool_max_size = parse_or(&get, "DB_POOL_MAX_SIZE", 10)?;

        Ok(Self {
            database_url,
            host,
            port,
            db_pool_max_size,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&'static str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
