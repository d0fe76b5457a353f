//! Download orchestration: one pass over the candidate sequence.
//!
//! Per-item failures (exhausted retries, invalid PDFs) are logged and do not
//! stop the run; the item stays out of the ledger and is picked up again on
//! the next invocation. Structural failures (unwritable tree, corrupt
//! ledger, duplicate filename) abort the whole run.

use crate::adapter::PaperSource;
use crate::fetch;
use crate::integrity;
use crate::ledger::{DownloadRecord, Ledger, ValidationStatus};
use crate::pacing::Pacer;
use crate::paper::PaperItem;
use crate::retry::RetryPolicy;
use anyhow::{Context, Result};
use std::fs;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Skip items whose filename is already in the ledger.
    pub resume: bool,
    /// Run the structural PDF check on every download.
    pub validate: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            resume: true,
            validate: true,
        }
    }
}

/// Per-run outcome counts. `invalid` items are also counted in `downloaded`
/// (they are on disk and in the ledger, flagged for audit).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub invalid: usize,
}

pub struct Runner {
    ledger: Ledger,
    policy: RetryPolicy,
    pacer: Pacer,
    timeout: Duration,
    options: RunOptions,
}

impl Runner {
    pub fn new(
        ledger: Ledger,
        policy: RetryPolicy,
        pacer: Pacer,
        timeout: Duration,
        options: RunOptions,
    ) -> Self {
        Self {
            ledger,
            policy,
            pacer,
            timeout,
            options,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Discover candidates from `source` and process them all.
    pub fn run_source(&mut self, source: &mut dyn PaperSource) -> Result<RunSummary> {
        let items = source
            .discover(&mut self.pacer)
            .with_context(|| format!("discovery failed for {}", source.board()))?;
        self.run_items(items)
    }

    /// Process candidates strictly in the given order.
    pub fn run_items(&mut self, items: impl IntoIterator<Item = PaperItem>) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for item in items {
            if self.options.resume && self.ledger.contains(&item.filename) {
                tracing::debug!("skipping {} - already downloaded", item.filename);
                summary.skipped += 1;
                continue;
            }

            if let Some(parent) = item.target_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create output directory {}", parent.display()))?;
            }

            match fetch::fetch_with_retry(
                &item.source_url,
                &item.target_path,
                self.timeout,
                &self.policy,
                &mut self.pacer,
            ) {
                Ok(bytes) => {
                    tracing::debug!("downloaded {} ({} bytes)", item.filename, bytes);
                }
                Err(failure) => {
                    // Transient; the item is retried on the next run.
                    tracing::warn!(
                        "failed to download {} from {}: {}",
                        item.filename,
                        item.source_url,
                        failure
                    );
                    summary.failed += 1;
                    continue;
                }
            }

            let status = if self.options.validate {
                if integrity::validate_pdf(&item.target_path) {
                    ValidationStatus::Valid
                } else {
                    // Kept on disk and recorded for audit, not deleted.
                    tracing::warn!(
                        "downloaded file is not a valid PDF: {}",
                        item.target_path.display()
                    );
                    summary.invalid += 1;
                    ValidationStatus::Invalid
                }
            } else {
                ValidationStatus::Unchecked
            };

            let hash = integrity::sha256_path(&item.target_path)?;
            self.ledger
                .append(DownloadRecord::for_item(&item, hash, status))?;
            summary.downloaded += 1;
        }

        tracing::info!(
            "run complete: {} downloaded, {} skipped, {} failed, {} invalid",
            summary.downloaded,
            summary.skipped,
            summary.failed,
            summary.invalid
        );
        Ok(summary)
    }
}
