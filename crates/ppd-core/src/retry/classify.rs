//! Classify HTTP status and curl errors into retry policy error kinds.

use super::error::FetchError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
///
/// Every non-2xx status is retryable; 429/503 are treated as throttling so a
/// future policy can back off harder for them.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        200..=299 => ErrorKind::Other,
        429 | 503 => ErrorKind::Throttled,
        _ => ErrorKind::Http(code as u16),
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify a fetch error (curl, HTTP, or storage) into an ErrorKind.
pub fn classify(e: &FetchError) -> ErrorKind {
    match e {
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => classify_http_status(*code),
        FetchError::Storage(_) => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_429_and_503_throttled() {
        assert_eq!(classify_http_status(429), ErrorKind::Throttled);
        assert_eq!(classify_http_status(503), ErrorKind::Throttled);
    }

    #[test]
    fn http_5xx_retryable() {
        assert!(matches!(classify_http_status(500), ErrorKind::Http(500)));
        assert!(matches!(classify_http_status(502), ErrorKind::Http(502)));
    }

    #[test]
    fn http_4xx_retryable_too() {
        assert!(matches!(classify_http_status(404), ErrorKind::Http(404)));
        assert!(matches!(classify_http_status(403), ErrorKind::Http(403)));
    }

    #[test]
    fn storage_not_retried() {
        let e = FetchError::Storage(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(classify(&e), ErrorKind::Other);
    }
}
