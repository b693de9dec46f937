//! CLI for the matchcheck data-integrity tools.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use matchcheck_core::config::{self, MatchcheckConfig};
use std::io;
use std::path::{Path, PathBuf};

use commands::{run_checksums, run_completions, run_man, run_validate};

/// Top-level CLI for matchcheck.
#[derive(Debug, Parser)]
#[command(name = "matchcheck")]
#[command(about = "matchcheck: checksum ledger and dataset validator for football match data", long_about = None)]
pub struct Cli {
    /// Project root holding the data directory and the ledger (default: current directory).
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Read configuration from FILE instead of ~/.config/matchcheck/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Report rendering for `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Write the checksum ledger for every file under the data directory.
    Checksums {
        /// Verify the ledger against current files instead of writing it.
        #[arg(long)]
        check: bool,
    },

    /// Validate the match dataset: schema, column types and derived fields.
    Validate {
        /// Output format for the report.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page to stdout.
    Man,
}

fn load_config(explicit: Option<&Path>) -> Result<MatchcheckConfig> {
    match explicit {
        Some(path) => config::load_from_path(path),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    /// Parse arguments and run. Returns Ok(false) when a check failed.
    pub fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        let mut stdout = io::stdout().lock();

        match cli.command {
            CliCommand::Completions { shell } => {
                run_completions(shell, &mut stdout);
                Ok(true)
            }
            CliCommand::Man => {
                run_man(&mut stdout)?;
                Ok(true)
            }
            CliCommand::Checksums { check } => {
                let (root, cfg) = setup(cli.root, cli.config.as_deref())?;
                run_checksums(&root, &cfg, check, &mut stdout)
            }
            CliCommand::Validate { format } => {
                let (root, cfg) = setup(cli.root, cli.config.as_deref())?;
                run_validate(&root, &cfg, format, &mut stdout)
            }
        }
    }
}

fn setup(root: Option<PathBuf>, config: Option<&Path>) -> Result<(PathBuf, MatchcheckConfig)> {
    let cfg = load_config(config)?;
    tracing::debug!("loaded config: {:?}", cfg);
    let root = match root {
        Some(r) => r,
        None => std::env::current_dir().context("current directory")?,
    };
    Ok((root, cfg))
}

#[cfg(test)]
mod tests;
