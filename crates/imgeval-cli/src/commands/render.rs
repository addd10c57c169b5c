use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use imgeval_core::model::ZoomLevels;
use imgeval_core::transform::Point;
use imgeval_core::viewport::render_view;

#[derive(Args)]
pub struct RenderArgs {
    /// Input image
    pub file: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "view.png")]
    pub output: PathBuf,

    /// Scale factor; must be one of the built-in zoom levels
    #[arg(short, long, default_value = "1.0")]
    pub zoom: f32,

    /// Horizontal pan in screen pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub pan_x: f32,

    /// Vertical pan in screen pixels
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub pan_y: f32,

    /// Container width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Container height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    let levels = ZoomLevels::fallback();
    if !levels.as_slice().contains(&args.zoom) {
        bail!(
            "Zoom {} is not one of the available levels {:?}",
            args.zoom,
            levels.as_slice()
        );
    }
    if args.width == 0 || args.height == 0 {
        bail!("Container must be at least 1x1 pixels");
    }

    let img = image::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?
        .to_rgba8();

    let view = render_view(
        &img,
        args.zoom,
        Point::new(args.pan_x, args.pan_y),
        args.width,
        args.height,
    );
    view.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Rendered {}x{} at {:.0}% into {}x{}, saved to {}",
        img.width(),
        img.height(),
        args.zoom * 100.0,
        args.width,
        args.height,
        args.output.display()
    );
    Ok(())
}
