//! Tracking ledger: one durable CSV row per successfully processed paper.
//!
//! The ledger is the source of truth for resume: a filename present here is
//! never fetched again. Every append rewrites the table to a temp file,
//! fsyncs and renames it over the ledger path, so the on-disk file is fully
//! parseable at every instant and a crash loses at most the in-flight item.

mod record;

pub use record::{DownloadRecord, ValidationStatus};

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Column order of the on-disk table. Kept explicit so an empty ledger still
/// carries a header row and schema drift fails loudly on load.
const COLUMNS: [&str; 12] = [
    "filename",
    "exam_board",
    "level",
    "paper_type",
    "subtype",
    "content_type",
    "year",
    "month",
    "file_path",
    "download_date",
    "file_hash",
    "validation_status",
];

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The persisted table cannot be parsed as the expected row schema.
    #[error("ledger {} is corrupt: {source}", .path.display())]
    Corrupt { path: PathBuf, source: csv::Error },
    /// A second record for the same filename was appended (or loaded); the
    /// naming scheme guarantees uniqueness, so this is a structural defect.
    #[error("duplicate ledger filename: {0}")]
    Duplicate(String),
    #[error("ledger write failed: {0}")]
    Write(#[source] csv::Error),
    #[error("ledger io: {0}")]
    Io(#[from] std::io::Error),
}

/// In-memory view of the ledger file plus the filename set for O(1) lookups.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    records: Vec<DownloadRecord>,
    filenames: HashSet<String>,
}

impl Ledger {
    /// Load the ledger at `path`. A missing file is not an error: downloads
    /// simply have not started yet, and the file appears on first append.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let mut ledger = Ledger {
            path,
            records: Vec::new(),
            filenames: HashSet::new(),
        };
        if !ledger.path.exists() {
            return Ok(ledger);
        }

        let mut reader =
            csv::Reader::from_path(&ledger.path).map_err(|source| LedgerError::Corrupt {
                path: ledger.path.clone(),
                source,
            })?;
        for row in reader.deserialize::<DownloadRecord>() {
            let record = row.map_err(|source| LedgerError::Corrupt {
                path: ledger.path.clone(),
                source,
            })?;
            if !ledger.filenames.insert(record.filename.clone()) {
                return Err(LedgerError::Duplicate(record.filename));
            }
            ledger.records.push(record);
        }
        Ok(ledger)
    }

    /// Start a fresh ledger at `path`, discarding any existing one
    /// (non-resume mode). Writes a header-only file immediately.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let ledger = Ledger {
            path: path.into(),
            records: Vec::new(),
            filenames: HashSet::new(),
        };
        ledger.flush()?;
        Ok(ledger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.filenames.contains(filename)
    }

    pub fn records(&self) -> &[DownloadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append one record and flush it to durable storage before returning.
    /// The ledger never buffers unflushed records across calls.
    pub fn append(&mut self, record: DownloadRecord) -> Result<(), LedgerError> {
        if self.filenames.contains(&record.filename) {
            return Err(LedgerError::Duplicate(record.filename));
        }
        self.filenames.insert(record.filename.clone());
        self.records.push(record);
        self.flush()
    }

    /// Rewrite the whole table to `<path>.tmp`, fsync, rename into place.
    fn flush(&self) -> Result<(), LedgerError> {
        let tmp = {
            let mut os = self.path.clone().into_os_string();
            os.push(".tmp");
            PathBuf::from(os)
        };

        let file = File::create(&tmp)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(COLUMNS).map_err(LedgerError::Write)?;
        for record in &self.records {
            writer.serialize(record).map_err(LedgerError::Write)?;
        }
        writer.flush()?;
        let file = writer
            .into_inner()
            .map_err(|e| LedgerError::Io(e.into_error()))?;
        file.sync_all()?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
