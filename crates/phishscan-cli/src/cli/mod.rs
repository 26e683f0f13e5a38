//! CLI for the phishscan URL risk analyzer.

mod commands;
mod control_socket;

use anyhow::Result;
use clap::{Parser, Subcommand};
use phishscan_core::config;
use phishscan_core::control::ControlCommand;
use std::path::PathBuf;

use commands::{run_analyze, run_batch, run_completions, run_config, run_control};

/// Top-level CLI for phishscan.
#[derive(Debug, Parser)]
#[command(name = "phishscan")]
#[command(about = "phishscan: phishing-URL risk scoring and batch analysis", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Analyze one or more URLs and print score, classification and signals.
    Analyze {
        /// URLs to analyze.
        #[arg(required = true)]
        urls: Vec<String>,
        /// Print one JSON object per result instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Analyze a list of URLs (one per line) sequentially with live progress.
    Batch {
        /// File with one URL per line; `-` or omitted reads stdin.
        input: Option<PathBuf>,
        /// Write completed results as CSV to this file (or into this directory).
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
        /// Print batch events as JSON lines instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Pause the running batch after its current URL.
    Pause,

    /// Resume a paused batch from its first pending URL.
    Resume,

    /// Discard the running batch.
    Reset,

    /// Show the config file path and effective configuration.
    Config,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Analyze { urls, json } => run_analyze(&cfg, &urls, json).await?,
            CliCommand::Batch {
                input,
                export,
                json,
            } => run_batch(&cfg, input.as_deref(), export.as_deref(), json).await?,
            CliCommand::Pause => run_control(ControlCommand::Pause).await?,
            CliCommand::Resume => run_control(ControlCommand::Resume).await?,
            CliCommand::Reset => run_control(ControlCommand::Reset).await?,
            CliCommand::Config => run_config(&cfg)?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
