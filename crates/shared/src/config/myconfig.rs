use anyhow::{Context, Result};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub is_dev: bool,
    pub enable_file_log: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub jwt_secret: String,
    pub jwt_expiration_secs: i64,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub otel_endpoint: Option<String>,
    pub log: LogConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let jwt_expiration_secs = env_or("JWT_EXPIRATION_IN_SECONDS", 604_800_i64)?;
        let port = env_or("PORT", 8080_u16)?;
        let max_connections = env_or("DB_MAX_CONNECTION", 5_u32)?;
        let min_connections = env_or("DB_MIN_CONNECTION", 1_u32)?;
        let bcrypt_cost = env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;

        let otel_endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let is_dev = env_or("DEV_MODE", false)?;
        let enable_file_log = env_or("ENABLE_FILE_LOG", false)?;

        Ok(Self {
            database: DatabaseConfig {
                url: database_url,
                min_connections,
                max_connections,
            },
            jwt_secret,
            jwt_expiration_secs,
            port,
            bcrypt_cost,
            otel_endpoint,
            log: LogConfig {
                is_dev,
                enable_file_log,
            },
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
