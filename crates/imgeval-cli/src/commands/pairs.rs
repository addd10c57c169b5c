use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use imgeval_core::pairs::discover_pairs;
use imgeval_core::scores::duplicate_filenames;

#[derive(Args)]
pub struct PairsArgs {
    /// Directory holding the template's *_A_* and *_B_* images
    pub dir: PathBuf,

    /// Print the pairs as the JSON `image_pairs` array
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &PairsArgs) -> Result<()> {
    let pairs = discover_pairs(&args.dir)
        .with_context(|| format!("Failed to read {}", args.dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
        return Ok(());
    }

    println!("{:>5}  {:<40}  {}", "#", "A", "B");
    println!("{}", "-".repeat(60));
    for (i, pair) in pairs.iter().enumerate() {
        println!("{:>5}  {:<40}  {}", i + 1, pair.a, pair.b);
    }
    println!("\n{} pairs in {}", pairs.len(), args.dir.display());

    for name in duplicate_filenames(&pairs) {
        println!("Warning: {name} appears in more than one pair");
    }
    Ok(())
}
