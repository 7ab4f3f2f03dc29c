//! Fetch command
//!
//! Fetch a video's comments, filter them and write the output files.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use sieve_core::comment::Script;
use sieve_core::config::Config;
use sieve_core::credentials::load_api_key;
use sieve_core::{Pipeline, RunSummary};

use super::GlobalOpts;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values with an Author,Comment header
    Csv,
    /// JSON array of {author, comment} objects
    Json,
}

impl ExportFormat {
    fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Arguments for the fetch command
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Video URL (prompted for when omitted)
    pub url: Option<String>,

    /// Script to filter for (hangul, hiragana, katakana, han, cyrillic, arabic, thai)
    #[arg(long, short, value_parser = parse_script)]
    pub script: Option<Script>,

    /// Output format
    #[arg(long, short, value_enum)]
    pub format: Option<ExportFormat>,

    /// Directory for the output files
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Comments per request (1-100, API default when omitted)
    #[arg(long)]
    pub max_results: Option<u32>,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,
}

fn parse_script(s: &str) -> std::result::Result<Script, String> {
    s.parse::<Script>().map_err(|e| e.to_string())
}

/// Execute the fetch command
pub fn execute(args: FetchArgs, global: &GlobalOpts) -> Result<()> {
    use colored::Colorize;

    let mut config =
        Config::discover(global.config.as_deref()).context("Failed to load configuration")?;
    apply_overrides(&mut config, &args);
    config.validate().context("Invalid configuration")?;
    tracing::debug!(
        "Output: {} files in {:?}, filter {}",
        config.output.format,
        config.output.dir,
        config.filter.script
    );

    let key = load_api_key(global.env_file.as_deref(), &config.api.key_env)?;

    let url = match args.url {
        Some(url) => url,
        None => prompt_url()?,
    };

    let pipeline = Pipeline::from_config(&config)?;

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = pipeline.run_with(&key, &url, |stage| spinner.set_message(stage.to_string()));
    spinner.finish_and_clear();

    let summary = result?;
    print_summary(&summary, pipeline.filter().tag());

    if summary.fetched == 0 {
        eprintln!("{} No comments returned for this video.", "⚠".yellow());
    }

    Ok(())
}

/// Command-line flags win over config file values
fn apply_overrides(config: &mut Config, args: &FetchArgs) {
    if let Some(script) = args.script {
        config.filter.script = script;
        config.filter.pattern = None;
    }
    if let Some(format) = args.format {
        config.output.format = format.name().to_string();
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }
    if args.max_results.is_some() {
        config.api.max_results = args.max_results;
    }
    if args.timeout.is_some() {
        config.api.timeout_secs = args.timeout;
    }
}

fn prompt_url() -> Result<String> {
    if std::io::stdin().is_terminal() {
        let url = dialoguer::Input::<String>::new()
            .with_prompt("Enter YouTube video URL")
            .interact_text()
            .context("Failed to read URL")?;
        Ok(url)
    } else {
        let mut line = String::new();
        std::io::stdin()
            .read_line(&mut line)
            .context("Failed to read URL from stdin")?;
        Ok(line.trim().to_string())
    }
}

fn print_summary(summary: &RunSummary, tag: &str) {
    use colored::Colorize;

    println!(
        "{} Video {} (owner {})",
        "✓".green(),
        summary.video_id.to_string().cyan(),
        summary.owner.to_string().dimmed()
    );
    println!(
        "  {} fetched, {} from owner skipped",
        summary.fetched.to_string().yellow(),
        summary.excluded
    );
    println!(
        "  {} {} -> {}",
        summary.all.to_string().yellow(),
        "all".bold(),
        summary.all_path.display()
    );
    println!(
        "  {} {} -> {}",
        summary.filtered.to_string().yellow(),
        tag.bold(),
        summary.filtered_path.display()
    );
}
