//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `mastr_export` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use mastr_export::initialization::init_logger_with;
use mastr_export::{run_export, Cli, Outcome};

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials usually live in .env; try the working directory first,
    // then the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("mastr_export error: {:#}", e);
            process::exit(1);
        }
    };

    match run_export(config).await {
        Ok(report) => {
            println!(
                "✅ Exported {} unit{} in {} categor{} ({} records fetched, {} failed, {} skipped) in {:.1}s",
                report.processed(),
                if report.processed() == 1 { "" } else { "s" },
                report.reports.len(),
                if report.reports.len() == 1 { "y" } else { "ies" },
                report.stats.total(Outcome::Succeeded),
                report.stats.total(Outcome::Failed),
                report.stats.total(Outcome::Skipped),
                report.elapsed_seconds
            );
            for category in &report.reports {
                println!("Results saved in {}", category.output_dir.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("mastr_export error: {:#}", e);
            process::exit(1);
        }
    }
}
