use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &["change-me-to-a-random-string", "dev-secret-change-me"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("FLOCK_JWT_SECRET is unset or still a placeholder")]
    MissingSecret,

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub addr: SocketAddr,
    pub token_ttl: chrono::Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let jwt_secret = var("FLOCK_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            return Err(ConfigError::MissingSecret);
        }

        let db_path = var("FLOCK_DB_PATH").unwrap_or_else(|| "flock.db".into()).into();
        let host = var("FLOCK_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = var("FLOCK_PORT").unwrap_or_else(|| "3000".into());
        let addr_str = format!("{}:{}", host, port);
        let addr = addr_str.parse().map_err(|_| ConfigError::Invalid {
            name: "FLOCK_HOST/FLOCK_PORT",
            value: addr_str.clone(),
        })?;

        let ttl_days = match var("FLOCK_TOKEN_TTL_DAYS") {
            Some(v) => v
                .parse::<i64>()
                .ok()
                .filter(|d| *d > 0)
                .ok_or(ConfigError::Invalid {
                    name: "FLOCK_TOKEN_TTL_DAYS",
                    value: v,
                })?,
            None => 30,
        };

        Ok(Self {
            jwt_secret,
            db_path,
            addr,
            token_ttl: chrono::Duration::days(ttl_days),
        })
    }
}
