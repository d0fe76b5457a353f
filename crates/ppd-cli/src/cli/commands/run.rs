//! `ppd run` – download all papers for one board profile.

use anyhow::{bail, Result};
use ppd_core::adapter::PmtSource;
use ppd_core::config::PpdConfig;
use ppd_core::ledger::Ledger;
use ppd_core::pacing::Pacer;
use ppd_core::profile;
use ppd_core::retry::RetryPolicy;
use ppd_core::runner::{RunOptions, Runner};
use std::path::PathBuf;
use std::time::Duration;

pub struct RunArgs {
    pub board: String,
    pub output: Option<PathBuf>,
    pub ledger: Option<PathBuf>,
    pub no_resume: bool,
    pub no_validate: bool,
    pub min_delay: Option<f64>,
    pub max_delay: Option<f64>,
}

pub fn run_download(cfg: &PpdConfig, args: RunArgs) -> Result<()> {
    let Some(profile) = profile::find_profile(&args.board) else {
        bail!(
            "unknown board profile '{}'; run `ppd boards` to list them",
            args.board
        );
    };

    let output = args.output.unwrap_or_else(|| cfg.download_dir.clone());
    let ledger_path = args.ledger.unwrap_or_else(|| cfg.ledger_path.clone());

    // --no-resume starts a fresh ledger; otherwise known filenames are skipped.
    let ledger = if args.no_resume {
        Ledger::create(&ledger_path)?
    } else {
        Ledger::load(&ledger_path)?
    };

    let mut pacing = cfg.pacing.clone().unwrap_or_default();
    if let Some(min) = args.min_delay {
        pacing.min_delay_secs = min;
    }
    if let Some(max) = args.max_delay {
        pacing.max_delay_secs = max;
    }
    let pacer = Pacer::from(&pacing);

    let retry = cfg.retry.clone().unwrap_or_default();
    let policy = RetryPolicy::from(&retry);
    let timeout = Duration::from_secs(cfg.timeout_secs);
    let options = RunOptions {
        resume: !args.no_resume,
        validate: cfg.validate && !args.no_validate,
    };

    tracing::info!(
        "downloading {} papers into {} (ledger {})",
        profile.name,
        output.display(),
        ledger_path.display()
    );

    let mut source = PmtSource::new(profile, output.clone(), timeout);
    let mut runner = Runner::new(ledger, policy, pacer, timeout, options);
    let summary = runner.run_source(&mut source)?;

    println!(
        "{}: {} downloaded, {} skipped, {} failed, {} invalid",
        profile.name, summary.downloaded, summary.skipped, summary.failed, summary.invalid
    );
    println!("Ledger: {}", ledger_path.display());
    Ok(())
}
