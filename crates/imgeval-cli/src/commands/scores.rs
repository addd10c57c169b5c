use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use imgeval_core::api::Backend;
use imgeval_core::config::AppConfig;
use imgeval_core::scores::{EvaluationRecord, SavedResults};

use crate::summary::print_scores;

#[derive(Args)]
pub struct ScoresArgs {
    /// Template id
    pub template_id: String,

    /// Evaluator (defaults to the configured user)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Upload scores from a JSON file (filename -> axis -> score) instead of
    /// printing the saved ones
    #[arg(long)]
    pub upload: Option<PathBuf>,

    /// Print saved scores as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ScoresArgs, config: &AppConfig) -> Result<()> {
    let backend = super::connect(config)?;
    let user = args.user.as_deref().unwrap_or(&config.user_id);

    if let Some(ref path) = args.upload {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let results: SavedResults = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a scores file", path.display()))?;
        let count = results.len();
        let record = EvaluationRecord::new(&args.template_id, user, Utc::now(), results);
        backend
            .save_evaluation(&record)
            .with_context(|| format!("Failed to save scores for {}", args.template_id))?;
        println!(
            "Saved scores for {count} images of {} as {user}",
            args.template_id
        );
        return Ok(());
    }

    let saved = backend
        .load_evaluation(&args.template_id, user)
        .with_context(|| format!("Failed to load scores for {}", args.template_id))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&saved.unwrap_or_default())?
        );
    } else {
        print_scores(&args.template_id, user, saved.as_ref());
    }
    Ok(())
}
