//! Candidate paper model and deterministic target-path derivation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What kind of document a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentKind {
    /// Question paper ("QP" in link text).
    #[serde(rename = "QP")]
    QuestionPaper,
    /// Mark scheme ("MS" in link text).
    #[serde(rename = "MS")]
    MarkScheme,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::QuestionPaper => "QP",
            ContentKind::MarkScheme => "MS",
        }
    }

    /// Directory component under the paper directory.
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::QuestionPaper => "question_papers",
            ContentKind::MarkScheme => "mark_schemes",
        }
    }
}

/// Classification metadata for one paper, extracted by the site adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperMeta {
    /// Exam board key, lowercase (e.g. "edexcel").
    pub exam_board: String,
    /// Qualification level, lowercase (e.g. "alevel").
    pub level: String,
    /// Paper display name (e.g. "Paper 1").
    pub paper_type: String,
    /// Optional split within a paper (e.g. "Mechanics" for Edexcel Paper 3).
    pub subtype: Option<String>,
    pub content: ContentKind,
    /// Exam year (e.g. 2022).
    pub year: u16,
    /// Exam month, capitalized, when the title carries one (e.g. "June").
    pub month: Option<String>,
}

impl PaperMeta {
    /// Directory for this paper relative to the output base:
    /// `{Board}/{LEVEL}/{Paper_N}[/{Subtype}]/{question_papers|mark_schemes}`.
    pub fn relative_dir(&self) -> PathBuf {
        let mut dir = PathBuf::from(capitalize(&self.exam_board));
        dir.push(self.level.to_uppercase());
        dir.push(self.paper_type.replace(' ', "_"));
        if let Some(subtype) = &self.subtype {
            dir.push(subtype);
        }
        dir.push(self.content.dir_name());
        dir
    }
}

/// One discoverable remote paper: metadata plus where it comes from and
/// where it lands. Immutable once produced by the adapter.
#[derive(Debug, Clone)]
pub struct PaperItem {
    pub meta: PaperMeta,
    /// Local filename, unique across the whole ledger.
    pub filename: String,
    pub source_url: String,
    /// Full destination path, derived from `meta`, `filename` and the base dir.
    pub target_path: PathBuf,
}

impl PaperItem {
    pub fn new(meta: PaperMeta, filename: String, source_url: String, base: &Path) -> Self {
        let target_path = base.join(meta.relative_dir()).join(&filename);
        Self {
            meta,
            filename,
            source_url,
            target_path,
        }
    }
}

/// Uppercases the first character only ("edexcel" -> "Edexcel", "ocr-mei" -> "Ocr-mei").
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
