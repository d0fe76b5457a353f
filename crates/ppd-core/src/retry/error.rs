//! Download error types for retry classification.

use std::fmt;

/// Error from a single download attempt (curl failure, HTTP error, or local
/// storage failure). Kept as an enum so the retry policy can classify it
/// before it is converted to anyhow at the orchestration layer.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, malformed URL, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// Writing the destination file failed (disk full, permissions). Not retried.
    Storage(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
            FetchError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Storage(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Storage(e)
    }
}

/// Final outcome of a download whose retry budget is exhausted (or that
/// failed on a non-retriable error). Reported per item, never fatal.
#[derive(Debug)]
pub struct FetchFailure {
    pub error: FetchError,
    /// Number of attempts actually made.
    pub attempts: u32,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after {} attempt(s))", self.error, self.attempts)
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
