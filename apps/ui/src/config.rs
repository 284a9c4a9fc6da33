use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
/// Everything has a sensible local-dev default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the scoring API.
    pub api_base_url: String,
    /// Timeout applied to every outbound request. There is no retry and no
    /// cancellation; the timeout is what keeps a hung request from wedging
    /// its busy flag forever.
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: std::env::var("MATCHER_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
