//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod doctor;
pub mod fetch;

use clap::{Parser, Subcommand};
use sieve_core::SieveError;
use std::path::PathBuf;

/// comment-sieve - fetch a video's comments and filter them by script
#[derive(Debug, Parser)]
#[command(name = "comment-sieve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Env file holding the API key (default: ./.env if present)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch comments for a video and write the output files
    Fetch(fetch::FetchArgs),

    /// Diagnose credentials and configuration
    Doctor(doctor::DoctorArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let global = GlobalOpts {
        config: cli.config,
        env_file: cli.env_file,
    };

    // Dispatch to command handler
    match cli.command {
        Commands::Fetch(args) => fetch::execute(args, &global),
        Commands::Doctor(args) => doctor::execute(args, &global),
        Commands::Config(cmd) => config::execute(cmd, &global),
    }
}

/// Exit code for a failed run: the code of the first [`SieveError`] in the
/// chain, or 1 for anything else
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SieveError>())
        .map(SieveError::exit_code)
        .unwrap_or(1)
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
