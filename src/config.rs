use std::env;

use anyhow::Context;
use chrono::TimeDelta;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Secret used to sign bearer tokens. Authentication fails with an
    /// internal error while this is unset.
    pub jwt_secret: Option<String>,
    pub jwt_ttl_hours: i64,
    pub db_max_connections: u32,
    pub body_limit_bytes: usize,
    pub max_concurrency: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_or("APP_PORT", 3000);
        let jwt_secret = env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());
        if jwt_secret.is_none() {
            tracing::warn!("JWT_SECRET is not set; authenticated endpoints will fail");
        }
        let jwt_ttl_hours = parse_or("JWT_TTL_HOURS", 24);
        token_ttl(jwt_ttl_hours).context("invalid JWT_TTL_HOURS")?;
        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_ttl_hours,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10),
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", 1024 * 1024),
            max_concurrency: parse_or("MAX_CONCURRENCY", 100),
        })
    }
}

/// Token lifetime for `hours`, which must be positive and fit a `TimeDelta`.
pub fn token_ttl(hours: i64) -> anyhow::Result<TimeDelta> {
    TimeDelta::try_hours(hours)
        .filter(|ttl| *ttl > TimeDelta::zero())
        .ok_or_else(|| {
            anyhow::anyhow!("token lifetime must be a positive number of hours, got {hours}")
        })
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
