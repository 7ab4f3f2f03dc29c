//! Doctor command
//!
//! Diagnose credentials and configuration without touching the network.

use anyhow::Result;
use clap::Args;
use std::path::Path;

use sieve_core::config::Config;
use sieve_core::credentials::load_api_key;
use sieve_core::export::ExportManager;

use super::GlobalOpts;

/// Arguments for the doctor command
#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Show suggestions for passing checks too
    #[arg(long)]
    pub suggestions: bool,
}

/// Check result
struct CheckResult {
    name: String,
    passed: bool,
    message: String,
    suggestion: Option<String>,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            suggestion: None,
        }
    }

    fn fail(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn warn(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: format!("⚠ {}", message),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    fn is_warning(&self) -> bool {
        self.passed && self.message.starts_with('⚠')
    }
}

/// Execute the doctor command
pub fn execute(args: DoctorArgs, global: &GlobalOpts) -> Result<()> {
    use colored::Colorize;

    let mut results = Vec::new();

    println!("\n{}", "Configuration".bold().underline());
    let loaded = Config::discover(global.config.as_deref())
        .and_then(|config| config.validate().map(|()| config));
    let config = match loaded {
        Ok(config) => {
            results.push(CheckResult::ok("Config", "loaded and valid"));
            config
        }
        Err(e) => {
            results.push(CheckResult::fail(
                "Config",
                &e.to_string(),
                Some("Run 'comment-sieve config validate' for details"),
            ));
            Config::default()
        }
    };
    results.push(check_filter(&config));
    results.extend(check_output(&config));
    results.push(check_api_key(global, &config));

    let mut errors = 0;
    let mut warnings = 0;
    for result in &results {
        let status = if !result.passed {
            errors += 1;
            "✗".red()
        } else if result.is_warning() {
            warnings += 1;
            "⚠".yellow()
        } else {
            "✓".green()
        };

        println!("   {} {}: {}", status, result.name, result.message);

        if !result.passed || result.is_warning() || args.suggestions {
            if let Some(suggestion) = &result.suggestion {
                println!("     {}", suggestion.dimmed());
            }
        }
    }

    println!(
        "\n{}: {} warnings, {} errors",
        "Summary".bold(),
        warnings.to_string().yellow(),
        errors.to_string().red()
    );

    if errors > 0 {
        anyhow::bail!("{} check(s) failed", errors);
    }
    if warnings == 0 {
        println!("\n{} All checks passed!", "✓".green());
    }

    Ok(())
}

fn check_api_key(global: &GlobalOpts, config: &Config) -> CheckResult {
    let var = &config.api.key_env;
    match load_api_key(global.env_file.as_deref(), var) {
        Ok(key) => CheckResult::ok("API key", &format!("{} is set ({})", var, key)),
        Err(e) => CheckResult::fail(
            "API key",
            &e.to_string(),
            Some(&format!("Add {}=<your key> to .env", var)),
        ),
    }
}

fn check_filter(config: &Config) -> CheckResult {
    match config.filter.build() {
        Ok(filter) => CheckResult::ok(
            "Filter",
            &format!("{} matches {}", filter.tag(), filter.pattern()),
        ),
        Err(e) => CheckResult::fail(
            "Filter",
            &e.to_string(),
            Some("Fix filter.pattern in the config file"),
        ),
    }
}

fn check_output(config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if ExportManager::new().has_format(&config.output.format) {
        results.push(CheckResult::ok("Format", &config.output.format));
    } else {
        results.push(CheckResult::fail(
            "Format",
            &format!("unknown format '{}'", config.output.format),
            Some("Use 'csv' or 'json'"),
        ));
    }

    results.push(check_output_dir(&config.output.dir));
    results
}

fn check_output_dir(dir: &Path) -> CheckResult {
    match std::fs::metadata(dir) {
        Ok(meta) if !meta.is_dir() => CheckResult::fail(
            "Output dir",
            &format!("{} is not a directory", dir.display()),
            None,
        ),
        Ok(meta) if meta.permissions().readonly() => CheckResult::fail(
            "Output dir",
            &format!("{} is read-only", dir.display()),
            None,
        ),
        Ok(_) => CheckResult::ok("Output dir", &dir.display().to_string()),
        Err(_) => CheckResult::warn(
            "Output dir",
            &format!("{} does not exist yet", dir.display()),
            Some("It will be created on the first run"),
        ),
    }
}
