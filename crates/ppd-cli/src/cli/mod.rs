//! CLI for the PPD past-paper downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ppd_core::config;
use std::path::{Path, PathBuf};

use commands::run::RunArgs;
use commands::{run_boards, run_checksum, run_download, run_status, run_validate};

/// Top-level CLI for the PPD past-paper downloader.
#[derive(Debug, Parser)]
#[command(name = "ppd")]
#[command(about = "PPD: resumable exam past-paper downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download all papers for one exam-board profile.
    Run {
        /// Board profile key (see `ppd boards`).
        board: String,

        /// Base directory for the downloaded paper tree (default from config).
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Path to the tracking ledger CSV (default from config).
        #[arg(long)]
        ledger: Option<PathBuf>,

        /// Start fresh: discard the ledger and re-download everything.
        #[arg(long)]
        no_resume: bool,

        /// Skip the structural PDF check on downloaded files.
        #[arg(long)]
        no_validate: bool,

        /// Minimum delay between requests in seconds.
        #[arg(long, value_name = "SECS")]
        min_delay: Option<f64>,

        /// Maximum delay between requests in seconds.
        #[arg(long, value_name = "SECS")]
        max_delay: Option<f64>,
    },

    /// List the built-in board profiles.
    Boards,

    /// Summarize the tracking ledger.
    Status {
        /// Path to the tracking ledger CSV (default from config).
        #[arg(long)]
        ledger: Option<PathBuf>,
    },

    /// Compute SHA-256 of a file (e.g. after download).
    Checksum {
        /// Path to the file.
        path: String,
    },

    /// Run the structural PDF check on a local file.
    Validate {
        /// Path to the file.
        path: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                board,
                output,
                ledger,
                no_resume,
                no_validate,
                min_delay,
                max_delay,
            } => run_download(
                &cfg,
                RunArgs {
                    board,
                    output,
                    ledger,
                    no_resume,
                    no_validate,
                    min_delay,
                    max_delay,
                },
            )?,
            CliCommand::Boards => run_boards(),
            CliCommand::Status { ledger } => run_status(&cfg, ledger)?,
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
            CliCommand::Validate { path } => run_validate(Path::new(&path)),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
