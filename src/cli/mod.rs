//! CLI Module
//!
//! Command-line interface for increport using Clap v4.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging;
use crate::report::safety_tips;
use crate::report::types::IncidentType;
use crate::tui;

/// increport - Terminal wizard for reporting cybercrime incidents
#[derive(Parser, Debug)]
#[command(name = "increport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (files in ~/.increport/logs/)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the report wizard directly, skipping the landing menu
    Report,

    /// Print the immediate safety tips for an incident type
    Tips {
        /// Incident type slug, e.g. phishing or data-breach
        incident_type: String,
    },

    /// Show the effective configuration
    Config,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration before logging so the configured level applies
    let config = load_config(cli.config.as_deref())?;

    let mut log_config = logging::LogConfig::new()
        .with_debug_mode(cli.debug)
        .with_level(config.logging.level.clone());
    if let Some(dir) = &config.logging.dir {
        log_config = log_config.with_log_dir(dir.clone());
    }
    if let Ok(dir) = std::env::var("INCREPORT_LOG_DIR") {
        log_config = log_config.with_log_dir(std::path::PathBuf::from(dir));
    }
    let log_dir = log_config.log_dir().clone();
    let _guard = logging::init_logging(log_config)?;

    // Keep a week of log files around
    if let Ok(removed) = logging::cleanup_old_logs(&log_dir, 7)
        && removed > 0
    {
        tracing::info!("cleaned up {removed} old log file(s)");
    }

    match cli.command {
        None => cmd_wizard(&config, true).await,
        Some(Commands::Report) => cmd_wizard(&config, false).await,
        Some(Commands::Tips { incident_type }) => cmd_tips(&incident_type),
        Some(Commands::Config) => cmd_config(&config),
    }
}

/// Load configuration from a custom path or the default location
fn load_config(config_path: Option<&str>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Launch the TUI, with or without the landing menu
async fn cmd_wizard(config: &Config, with_menu: bool) -> Result<()> {
    let app = tui::App::new(config.clone(), with_menu);
    tui::run(app).await.context("TUI error")
}

/// Print safety tips for one incident type, non-interactively
fn cmd_tips(slug: &str) -> Result<()> {
    let incident_type: IncidentType = slug.parse()?;
    println!("Immediate safety tips for {}:", incident_type.label());
    for tip in safety_tips::tips_for(incident_type) {
        println!("  • {tip}");
    }
    Ok(())
}

/// Dump the effective configuration as TOML
fn cmd_config(config: &Config) -> Result<()> {
    let rendered =
        toml::to_string_pretty(config).context("failed to render configuration")?;
    println!("# config file: {}", Config::default_path().display());
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_default_invocation() {
        let cli = Cli::try_parse_from(["increport"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_parses_report_with_debug() {
        let cli = Cli::try_parse_from(["increport", "--debug", "report"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Some(Commands::Report)));
    }

    #[test]
    fn test_cli_parses_tips_slug() {
        let cli = Cli::try_parse_from(["increport", "tips", "data-breach"]).unwrap();
        match cli.command {
            Some(Commands::Tips { incident_type }) => assert_eq!(incident_type, "data-breach"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_tips_rejects_unknown_slug() {
        assert!(cmd_tips("sql-injection").is_err());
        assert!(cmd_tips("phishing").is_ok());
    }
}
