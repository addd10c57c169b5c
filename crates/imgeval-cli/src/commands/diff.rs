use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use image::DynamicImage;
use imgeval_core::config::AppConfig;
use imgeval_core::diff::{compute_diff, legend};
use imgeval_core::loader::Bitmap;
use imgeval_core::model::Threshold;
use tracing::info;

use crate::summary::print_legend;

#[derive(Args)]
pub struct DiffArgs {
    /// Image A
    pub a: PathBuf,

    /// Image B
    pub b: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "diff.png")]
    pub output: PathBuf,

    /// Mean channel difference above which a pixel is marked red
    /// (0-255, defaults to the configured threshold)
    #[arg(short, long)]
    pub threshold: Option<Threshold>,
}

pub fn run(args: &DiffArgs, config: &AppConfig) -> Result<()> {
    let threshold = args.threshold.unwrap_or_else(|| config.threshold());

    let a = image::open(&args.a)
        .with_context(|| format!("Failed to open {}", args.a.display()))?;
    let b = image::open(&args.b)
        .with_context(|| format!("Failed to open {}", args.b.display()))?;

    let start = Instant::now();
    let out = compute_diff(&a, &b, threshold)?;
    info!(
        width = out.width(),
        height = out.height(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Diff computed"
    );

    out.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    let bitmap = Bitmap::new(DynamicImage::ImageRgb8(out).to_rgba8());
    println!(
        "Diff at threshold {} saved to {}",
        threshold,
        args.output.display()
    );
    print_legend(&legend(&bitmap));
    Ok(())
}
