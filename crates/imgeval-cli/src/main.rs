mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imgeval_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "imgeval", about = "A/B image comparison and scoring tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./imgeval.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List evaluation templates on the backend
    Templates(commands::templates::TemplatesArgs),
    /// Show the image pairs and score axes of a template
    Detail(commands::detail::DetailArgs),
    /// Render the three-colour diff of two local images
    Diff(commands::diff::DiffArgs),
    /// Render one pane at a zoom level and pan offset
    Render(commands::render::RenderArgs),
    /// Load or upload saved scores
    Scores(commands::scores::ScoresArgs),
    /// Find A/B pairs in a template image directory
    Pairs(commands::pairs::PairsArgs),
    /// Print or save the effective configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config =
        AppConfig::resolve(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    match &cli.command {
        Commands::Templates(args) => commands::templates::run(args, &config),
        Commands::Detail(args) => commands::detail::run(args, &config),
        Commands::Diff(args) => commands::diff::run(args, &config),
        Commands::Render(args) => commands::render::run(args),
        Commands::Scores(args) => commands::scores::run(args, &config),
        Commands::Pairs(args) => commands::pairs::run(args),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
