use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use imgeval_core::catalog::{page, page_count, Catalog, SortOrder};
use imgeval_core::config::AppConfig;
use imgeval_core::consts::TEMPLATES_PER_PAGE;
use indicatif::{ProgressBar, ProgressStyle};

use crate::summary::print_catalog;

#[derive(Clone, ValueEnum)]
pub enum SortArg {
    Latest,
    Oldest,
    Title,
}

impl From<&SortArg> for SortOrder {
    fn from(arg: &SortArg) -> Self {
        match arg {
            SortArg::Latest => SortOrder::Latest,
            SortArg::Oldest => SortOrder::Oldest,
            SortArg::Title => SortOrder::Title,
        }
    }
}

#[derive(Args)]
pub struct TemplatesArgs {
    /// Only show templates whose title or description contains this text
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Sort order
    #[arg(long, value_enum, default_value = "latest")]
    pub sort: SortArg,

    /// Page to show (1-based)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Templates per page
    #[arg(long, default_value_t = TEMPLATES_PER_PAGE)]
    pub per_page: usize,
}

pub fn run(args: &TemplatesArgs, config: &AppConfig) -> Result<()> {
    let backend = super::connect(config)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Fetching templates");

    let catalog = Catalog::fetch(&backend, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })
    .with_context(|| format!("Failed to list templates from {}", config.api_url))?;
    pb.finish_and_clear();

    let matches = catalog.query(&args.search, SortOrder::from(&args.sort));
    let per_page = args.per_page.max(1);
    let pages = page_count(matches.len(), per_page);
    let current = args.page.clamp(1, pages.max(1));

    print_catalog(page(&matches, current, per_page), current, pages, matches.len());
    Ok(())
}
