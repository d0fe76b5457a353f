//! Site adapters: discovery of candidate papers.
//!
//! An adapter turns one board profile into an ordered, finite list of
//! [`PaperItem`]s. The runner performs no retry or backoff on discovery;
//! a failed discovery aborts before any download state changes, so simply
//! rerunning is safe.

mod classify;
mod pmt;

pub use classify::{content_kind, month, paper_from_link, subtype, year};
pub use pmt::PmtSource;

use crate::pacing::Pacer;
use crate::paper::PaperItem;

/// An ordered, finite, restartable-from-start source of candidate papers.
pub trait PaperSource {
    /// Board key, for logs.
    fn board(&self) -> &str;

    /// Produce the candidate list in a stable order. Calling this again
    /// must restart discovery from scratch (same sequence for an unchanged
    /// remote page). The pacer is consulted before any outbound request so
    /// discovery counts toward the inter-request gap like every other call.
    fn discover(&mut self, pacer: &mut Pacer) -> anyhow::Result<Vec<PaperItem>>;
}
