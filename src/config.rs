//! Runtime settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use crate::i18n::Locale;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// When absent the application runs on the in-memory store.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub page_size: u32,
    pub default_locale: Locale,
    pub vet_cache_ttl: Duration,
    pub vet_cache_capacity: u64,
    pub seed_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: None,
            max_connections: 5,
            page_size: 5,
            default_locale: Locale::En,
            vet_cache_ttl: Duration::from_secs(300),
            vet_cache_capacity: 100,
            seed_data: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let page_size = parse_or("PAGE_SIZE", get("PAGE_SIZE"), defaults.page_size)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "PAGE_SIZE",
                value: "0".into(),
            });
        }

        Ok(Settings {
            bind_addr: parse_or("BIND_ADDR", get("BIND_ADDR"), defaults.bind_addr)?,
            database_url: get("DATABASE_URL"),
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                defaults.max_connections,
            )?,
            page_size,
            default_locale: match get("DEFAULT_LOCALE") {
                Some(v) => v.parse()?,
                None => defaults.default_locale,
            },
            vet_cache_ttl: Duration::from_secs(parse_or(
                "VET_CACHE_TTL_SECS",
                get("VET_CACHE_TTL_SECS"),
                defaults.vet_cache_ttl.as_secs(),
            )?),
            vet_cache_capacity: parse_or(
                "VET_CACHE_CAPACITY",
                get("VET_CACHE_CAPACITY"),
                defaults.vet_cache_capacity,
            )?,
            seed_data: parse_or("SEED_DATA", get("SEED_DATA"), defaults.seed_data)?,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
