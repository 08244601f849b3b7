use std::env;
use std::net::{IpAddr, SocketAddr};

use chrono::TimeDelta;
use thiserror::Error;
use tracing::warn;

const DEV_JWT_SECRET: &str = "dev_only_insecure_key_for_testing";
const DEFAULT_DATABASE_URL: &str = "sqlite://golf.db";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Bearer tokens stay valid for one week.
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET_KEY must be set in production")]
    MissingSecret,

    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub token_lifetime: TimeDelta,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so callers can feed a map instead of the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("ENV").as_deref());

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host: IpAddr = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "HOST",
                value: raw,
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;
        let max_connections = parse_or(
            "DB_MAX_CONNECTIONS",
            lookup("DB_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;

        let jwt_secret = match lookup("JWT_SECRET_KEY").filter(|v| !v.is_empty()) {
            Some(secret) => secret,
            None if environment == Environment::Production => {
                return Err(ConfigError::MissingSecret);
            }
            None => {
                warn!("JWT_SECRET_KEY is not set, using the insecure development key");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            environment,
            database_url,
            bind_addr: SocketAddr::new(host, port),
            max_connections,
            jwt_secret,
            token_lifetime: TimeDelta::days(TOKEN_LIFETIME_DAYS),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
