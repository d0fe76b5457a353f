//! Ledger row schema.

use crate::paper::{ContentKind, PaperItem};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

/// Outcome of the structural PDF check for a downloaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    /// The file did not parse as a PDF. It is kept on disk and recorded so a
    /// human can audit it; see DESIGN.md for the policy discussion.
    Invalid,
    /// Validation was disabled for this run.
    Unchecked,
}

/// One persisted row per successfully processed paper. Field order is the
/// on-disk column order. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub filename: String,
    pub exam_board: String,
    pub level: String,
    pub paper_type: String,
    pub subtype: Option<String>,
    pub content_type: ContentKind,
    pub year: u16,
    pub month: Option<String>,
    pub file_path: String,
    /// ISO-8601 local timestamp of the download.
    pub download_date: String,
    /// SHA-256 of the file bytes, lowercase hex.
    pub file_hash: String,
    pub validation_status: ValidationStatus,
}

impl DownloadRecord {
    /// Build the row for a just-downloaded item, stamped with the current time.
    pub fn for_item(item: &PaperItem, file_hash: String, status: ValidationStatus) -> Self {
        Self {
            filename: item.filename.clone(),
            exam_board: item.meta.exam_board.clone(),
            level: item.meta.level.clone(),
            paper_type: item.meta.paper_type.clone(),
            subtype: item.meta.subtype.clone(),
            content_type: item.meta.content,
            year: item.meta.year,
            month: item.meta.month.clone(),
            file_path: item.target_path.display().to_string(),
            download_date: chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            file_hash,
            validation_status: status,
        }
    }
}
