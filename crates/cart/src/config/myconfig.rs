use anyhow::{Context, Result};
use shared::config::{CommonConfig, env_or};

#[derive(Debug, Clone)]
pub struct Config {
    pub common: CommonConfig,
    pub book_service_url: String,
}

impl Config {
    pub fn init() -> Result<Self> {
        let common = CommonConfig::init().context("Failed to load common configuration")?;

        let book_service_url = env_or(
            "BOOK_SERVICE_URL",
            "http://localhost:3004/api/books".to_string(),
        )?;

        Ok(Self {
            common,
            book_service_url,
        })
    }
}
