use anyhow::{Context, Result};
use clap::Args;
use imgeval_core::api::Backend;
use imgeval_core::config::AppConfig;
use imgeval_core::scores::duplicate_filenames;
use tracing::warn;

use crate::summary::print_detail;

#[derive(Args)]
pub struct DetailArgs {
    /// Template id
    pub template_id: String,

    /// Print the raw detail as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &DetailArgs, config: &AppConfig) -> Result<()> {
    let backend = super::connect(config)?;
    let detail = backend
        .template_detail(&args.template_id)
        .with_context(|| format!("Failed to load template {}", args.template_id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    let duplicates = duplicate_filenames(&detail.image_pairs);
    if !duplicates.is_empty() {
        warn!(
            count = duplicates.len(),
            "A filenames repeat; saved scores keep only the last pair for each"
        );
    }
    print_detail(&args.template_id, &detail, &duplicates);
    Ok(())
}
