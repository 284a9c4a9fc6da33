mod api;
mod config;
mod controller;
mod errors;
mod models;
mod session;
mod view;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api::HttpRankingApi;
use crate::config::Config;
use crate::controller::Matcher;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Matcher UI v{}", env!("CARGO_PKG_VERSION"));
    info!("Scoring API: {}", config.api_base_url);

    let api = HttpRankingApi::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let matcher = Matcher::new(Arc::new(api));

    session::run(matcher).await
}
