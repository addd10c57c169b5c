use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use imgeval_core::config::AppConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the config in effect (file and environment applied) instead of
    /// the built-in defaults
    #[arg(long)]
    pub resolved: bool,
}

/// Print or save the config as TOML.
pub fn run(args: &ConfigArgs, current: &AppConfig) -> Result<()> {
    let config = if args.resolved {
        current.clone()
    } else {
        AppConfig::default()
    };

    if let Some(ref path) = args.output {
        config
            .save(path)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", config.to_toml_string()?);
    }

    Ok(())
}
