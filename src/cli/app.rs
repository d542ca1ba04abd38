//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{config_cmd, problem_cmd};
use crate::domain::Language;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "dojo")]
#[command(author, version, about = "Keep coding-challenge problems as local source files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, short = 'c', global = true, env = "DOJO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file with default values
    Init,

    /// Get or set a config value
    Config {
        /// Path to the config entry, dot-separated (e.g. main.problems_dir)
        key: String,

        /// Value to set; `none` restores the default
        value: Option<String>,
    },

    /// List supported languages
    Languages,

    /// Work with saved LeetCode problems
    #[command(subcommand)]
    Leetcode(problem_cmd::ProblemCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Dojo CLI starting");

    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let created = Config::init(&config_path)?;
    if created {
        output.verbose_ctx("config", &format!("Created default config at {}", config_path.display()));
    }

    let config = Config::load(&config_path)?;
    output.verbose_ctx("config", &format!("Loaded config from {}", config_path.display()));

    match cli.command {
        Commands::Init => {
            let message = if created {
                format!("Created config at {}", config_path.display())
            } else {
                format!("Config already exists at {}", config_path.display())
            };
            output.success(&message);
        }

        Commands::Config { key, value } => {
            config_cmd::run(&output, config, &config_path, &key, value.as_deref())?
        }

        Commands::Languages => languages(&output),

        Commands::Leetcode(cmd) => problem_cmd::run(cmd, &config, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Prints the language catalog
fn languages(output: &Output) {
    if output.is_json() {
        output.data(&Language::all());
        return;
    }

    let rows: Vec<Vec<String>> = Language::all()
        .iter()
        .map(|l| {
            vec![
                l.name.to_string(),
                l.file_extension.to_string(),
                l.comment_marker.to_string(),
                l.kind.to_string(),
            ]
        })
        .collect();
    output.table(&[("NAME", 16), ("EXT", 8), ("COMMENT", 8), ("KIND", 0)], &rows);
}
