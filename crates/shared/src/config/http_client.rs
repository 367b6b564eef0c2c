use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl HttpClientConfig {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            connect_timeout: Duration::from_secs(timeout_secs.min(3)),
        }
    }

    /// Every outbound call made with this client is bounded by `timeout`.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .context("Failed to build HTTP client")
    }
}
