pub mod config;
pub mod detail;
pub mod diff;
pub mod pairs;
pub mod render;
pub mod scores;
pub mod templates;

use anyhow::{Context, Result};
use imgeval_core::api::HttpBackend;
use imgeval_core::config::AppConfig;

pub(crate) fn connect(config: &AppConfig) -> Result<HttpBackend> {
    HttpBackend::from_config(config)
        .with_context(|| format!("Invalid backend URL {}", config.api_url))
}
