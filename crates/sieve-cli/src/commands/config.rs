//! Config command
//!
//! Manage comment-sieve configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};

use sieve_core::config::{user_config_path, Config, LOCAL_CONFIG_PATH};

use super::GlobalOpts;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite without confirmation
        #[arg(long)]
        force: bool,

        /// Write to the user config directory instead of the project
        #[arg(long)]
        user: bool,
    },

    /// Validate the configuration file
    Validate,

    /// Show where configuration is looked up
    Path,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(global, json),
        ConfigCommand::Init { force, user } => init_config(global, force, user),
        ConfigCommand::Validate => validate_config(global),
        ConfigCommand::Path => show_paths(global),
    }
}

/// The file that would be loaded, if any
fn active_config_path(global: &GlobalOpts) -> Option<PathBuf> {
    if let Some(path) = &global.config {
        return Some(path.clone());
    }
    Config::search_paths().into_iter().find(|p| p.exists())
}

fn show_config(global: &GlobalOpts, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = Config::discover(global.config.as_deref()).context("Failed to load configuration")?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    match active_config_path(global) {
        Some(path) => println!("{}", path.display().to_string().dimmed()),
        None => println!("{}", "(built-in defaults)".dimmed()),
    }
    println!();
    println!("{}", config.to_toml()?);

    Ok(())
}

fn init_config(global: &GlobalOpts, force: bool, user: bool) -> Result<()> {
    use colored::Colorize;

    let config_path = if let Some(path) = &global.config {
        path.clone()
    } else if user {
        user_config_path().context("Could not determine the user config directory")?
    } else {
        PathBuf::from(LOCAL_CONFIG_PATH)
    };

    if config_path.exists() {
        if !force {
            use dialoguer::Confirm;

            let confirmed = Confirm::new()
                .with_prompt(format!("Overwrite {}?", config_path.display()))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("Init cancelled.");
                return Ok(());
            }
        }

        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(&config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    write_default_config(&config_path)?;
    println!(
        "{} Wrote default configuration to {}",
        "✓".green(),
        config_path.display()
    );

    Ok(())
}

fn write_default_config(path: &Path) -> Result<()> {
    let body = Config::default().to_toml()?;
    let content = format!("# comment-sieve configuration\n\n{}", body);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, content).context(format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn validate_config(global: &GlobalOpts) -> Result<()> {
    use colored::Colorize;

    let Some(config_path) = active_config_path(global) else {
        println!("{} No configuration file found; built-in defaults apply.", "⚠".yellow());
        return Ok(());
    };

    let content = fs::read_to_string(&config_path)
        .context(format!("Failed to read {}", config_path.display()))?;

    let raw: toml::Value = toml::from_str(&content)
        .context(format!("Invalid TOML in {}", config_path.display()))?;
    println!("{} Configuration is valid TOML", "✓".green());

    let mut warnings = Vec::new();
    for section in ["api", "filter", "output"] {
        if raw.get(section).is_none() {
            warnings.push(format!("[{}] section not found, defaults apply", section));
        }
    }
    for warning in &warnings {
        println!("{} {}", "⚠".yellow(), warning);
    }

    Config::from_toml(&content).context(format!("Invalid configuration in {}", config_path.display()))?;
    println!("{} All values are in range", "✓".green());

    Ok(())
}

fn show_paths(global: &GlobalOpts) -> Result<()> {
    use colored::Colorize;

    let active = active_config_path(global);
    let candidates = match &global.config {
        Some(path) => vec![path.clone()],
        None => Config::search_paths(),
    };

    println!("{}", "Config lookup order:".bold().underline());
    for path in candidates {
        let marker = if Some(&path) == active.as_ref() {
            "●".green()
        } else if path.exists() {
            "○".normal()
        } else {
            "·".dimmed()
        };
        println!("  {} {}", marker, path.display());
    }

    Ok(())
}
