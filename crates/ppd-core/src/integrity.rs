//! File integrity: content hashing and structural PDF validation.
//!
//! Validation is best-effort structural, not semantic: it asks whether the
//! bytes parse as a PDF with at least one page, not whether the document is
//! the paper its metadata claims.

use anyhow::{Context, Result};
use lopdf::Document;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded.
pub fn sha256_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let digest = hasher.finalize();
    Ok(hex::encode(digest))
}

/// Structural PDF check: does the file parse, and does it have pages?
///
/// Always returns a verdict; parse failures (truncated download, HTML error
/// page saved as .pdf, zero-byte file) are reported as `false`, never as an
/// error. The file handle is scoped to the parse.
pub fn validate_pdf(path: &Path) -> bool {
    match Document::load(path) {
        Ok(doc) => !doc.get_pages().is_empty(),
        Err(e) => {
            tracing::debug!("pdf validation failed for {}: {}", path.display(), e);
            false
        }
    }
}
