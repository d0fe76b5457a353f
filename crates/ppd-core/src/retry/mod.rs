//! Retry and backoff policy.
//!
//! This module encapsulates error classification (timeouts, throttling,
//! connection failures) and exponential backoff decisions so the fetch loop
//! and the adapter share a consistent policy.

mod classify;
mod error;
mod policy;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::{FetchError, FetchFailure};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
