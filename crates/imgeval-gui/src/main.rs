mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::sync::Arc;

use anyhow::Context;
use imgeval_core::api::HttpBackend;
use imgeval_core::config::AppConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = AppConfig::resolve(None).context("Failed to load configuration")?;
    let backend = HttpBackend::from_config(&config)
        .with_context(|| format!("Invalid API URL {:?}", config.api_url))?;
    tracing::info!(api_url = %backend.base_url(), user_id = %config.user_id, "Starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1440.0, 860.0])
            .with_min_inner_size([960.0, 600.0])
            .with_title("Image Evaluation"),
        ..Default::default()
    };

    eframe::run_native(
        "ImgEval",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::ImgEvalApp::new(
                &cc.egui_ctx,
                config,
                Arc::new(backend),
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
