use crate::config::{HttpClientConfig, ServiceToken};
use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

pub fn env_required(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Missing environment variable: {key}"))
}

pub fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        _ => Ok(default),
    }
}

pub fn parse_bool_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}

pub fn env_bool(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_bool_flag(key, &raw),
        _ => Ok(default),
    }
}

/// Settings every service reads at startup.
#[derive(Debug, Clone)]
pub struct CommonConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub service_token: ServiceToken,
    pub run_migrations: bool,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub http_client: HttpClientConfig,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl CommonConfig {
    pub fn init() -> Result<Self> {
        let database_url = env_required("DATABASE_URL")?;
        let jwt_secret = env_required("JWT_SECRET")?;

        let port = env_required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let service_token = env_required("CART_SERVICE_TOKEN")?;
        if service_token.trim().is_empty() {
            return Err(anyhow!("CART_SERVICE_TOKEN must not be empty"));
        }

        let run_migrations = env_bool("RUN_MIGRATIONS", false)?;
        let db_max_conn = env_or("DB_MAX_CONNECTION", 5u32)?;
        let db_min_conn = env_or("DB_MIN_CONNECTION", 1u32)?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONNECTION ({db_min_conn}) must not exceed DB_MAX_CONNECTION ({db_max_conn})"
            ));
        }

        let timeout_secs = env_or("HTTP_CLIENT_TIMEOUT_SECS", 10u64)?;
        if timeout_secs == 0 {
            return Err(anyhow!("HTTP_CLIENT_TIMEOUT_SECS must be greater than zero"));
        }

        let otel_endpoint = env_or(
            "OTEL_ENDPOINT",
            "http://otel-collector:4317".to_string(),
        )?;

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            service_token: ServiceToken::new(service_token),
            run_migrations,
            db_max_conn,
            db_min_conn,
            http_client: HttpClientConfig::new(timeout_secs),
            otel_endpoint,
            is_dev: env_bool("DEV_MODE", false)?,
            enable_file_log: env_bool("ENABLE_FILE_LOG", false)?,
        })
    }
}
