//! `ppd status` – summarize the tracking ledger.

use anyhow::Result;
use ppd_core::config::PpdConfig;
use ppd_core::ledger::{Ledger, ValidationStatus};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub fn run_status(cfg: &PpdConfig, ledger_override: Option<PathBuf>) -> Result<()> {
    let path = ledger_override.unwrap_or_else(|| cfg.ledger_path.clone());
    let ledger = Ledger::load(&path)?;

    if ledger.is_empty() {
        println!("No downloads recorded in {}.", path.display());
        return Ok(());
    }

    let mut by_board: BTreeMap<(String, String), usize> = BTreeMap::new();
    let mut invalid = 0usize;
    let mut unchecked = 0usize;
    for record in ledger.records() {
        *by_board
            .entry((record.exam_board.clone(), record.level.clone()))
            .or_default() += 1;
        match record.validation_status {
            ValidationStatus::Invalid => invalid += 1,
            ValidationStatus::Unchecked => unchecked += 1,
            ValidationStatus::Valid => {}
        }
    }

    println!("{:<12} {:<8} {}", "BOARD", "LEVEL", "PAPERS");
    for ((board, level), count) in &by_board {
        println!("{:<12} {:<8} {}", board, level, count);
    }
    println!("{} record(s) total in {}", ledger.len(), path.display());
    if invalid > 0 {
        println!("{} file(s) failed validation - inspect before use", invalid);
    }
    if unchecked > 0 {
        println!("{} file(s) downloaded with validation disabled", unchecked);
    }
    Ok(())
}
