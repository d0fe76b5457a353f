//! Blocking HTTP fetch via libcurl.
//!
//! Downloads stream to a `<dest>.part` file which is fsynced and renamed
//! into place only after a 2xx response completes; any failure removes the
//! part file, so the destination path never holds a half-downloaded file.

use crate::pacing::Pacer;
use crate::retry::{classify, FetchError, FetchFailure, RetryDecision, RetryPolicy};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Sent on every request; the site serves plain browsers, not bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

fn configure(easy: &mut curl::easy::Easy, timeout: Duration) -> Result<(), curl::Error> {
    easy.useragent(USER_AGENT)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;
    easy.low_speed_limit(1024)?;
    easy.low_speed_time(Duration::from_secs(60))?;
    easy.timeout(timeout)?;
    Ok(())
}

fn part_path(dest: &Path) -> PathBuf {
    let mut os = dest.to_path_buf().into_os_string();
    os.push(".part");
    PathBuf::from(os)
}

/// Fetch `url` into `dest` with a single attempt. Returns bytes written.
///
/// On any failure the part file is removed before returning; `dest` itself
/// is only ever created by the final rename.
pub fn fetch_to_path(url: &str, dest: &Path, timeout: Duration) -> Result<u64, FetchError> {
    let part = part_path(dest);
    let result = stream_to_dest(url, &part, dest, timeout);
    if result.is_err() {
        let _ = fs::remove_file(&part);
    }
    result
}

fn stream_to_dest(
    url: &str,
    part: &Path,
    dest: &Path,
    timeout: Duration,
) -> Result<u64, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    configure(&mut easy, timeout)?;

    let file = File::create(part)?;
    let mut writer = BufWriter::new(file);
    let mut written: u64 = 0;
    let mut storage_err: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match writer.write_all(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                storage_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };
    if let Err(e) = performed {
        return Err(match storage_err.take() {
            Some(io_err) => FetchError::Storage(io_err),
            None => FetchError::Curl(e),
        });
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }

    let file = writer
        .into_inner()
        .map_err(|e| FetchError::Storage(e.into_error()))?;
    file.sync_all()?;
    drop(file);
    fs::rename(part, dest)?;
    Ok(written)
}

/// Fetch `url` into memory as text (index pages). Single attempt.
pub fn fetch_text(url: &str, timeout: Duration) -> Result<String, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    configure(&mut easy, timeout)?;

    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform().map_err(FetchError::Curl)?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Fetch with retry/backoff, observing the pacing gap before every attempt.
///
/// Retriable failures sleep the policy's backoff (with jitter) and try
/// again; the pacing gap then applies on top for the next request. Exhausted
/// or non-retriable failures return a [`FetchFailure`] carrying the attempt
/// count; the caller reports it and moves on.
pub fn fetch_with_retry(
    url: &str,
    dest: &Path,
    timeout: Duration,
    policy: &RetryPolicy,
    pacer: &mut Pacer,
) -> Result<u64, FetchFailure> {
    let mut attempt = 1u32;
    loop {
        pacer.pause();
        match fetch_to_path(url, dest, timeout) {
            Ok(written) => return Ok(written),
            Err(e) => {
                let kind = classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => {
                        return Err(FetchFailure { error: e, attempts: attempt })
                    }
                    RetryDecision::RetryAfter(delay) => {
                        tracing::debug!(
                            "attempt {} for {} failed ({}), retrying in {:.1}s",
                            attempt,
                            url,
                            e,
                            delay.as_secs_f64()
                        );
                        std::thread::sleep(delay);
                        attempt += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("/papers/June-2022-QP.pdf")),
            PathBuf::from("/papers/June-2022-QP.pdf.part")
        );
    }

    #[test]
    fn malformed_url_fails_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        let err = fetch_to_path("not a url", &dest, Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, FetchError::Curl(_)));
        assert!(!dest.exists());
        assert!(!part_path(&dest).exists());
    }

    #[test]
    fn malformed_url_not_retried() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        let mut pacer = Pacer::new(Duration::ZERO, Duration::ZERO);
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            jitter: Duration::ZERO,
        };
        let failure =
            fetch_with_retry("not a url", &dest, Duration::from_secs(5), &policy, &mut pacer)
                .unwrap_err();
        assert_eq!(failure.attempts, 1);
    }
}
