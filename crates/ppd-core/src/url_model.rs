//! Filename derivation for downloaded papers.
//!
//! PMT paper URLs end in a percent-encoded PDF name
//! (`.../June%202022%20QP%20-%20Paper%201.pdf`). The local filename is the
//! decoded last path segment, sanitized for Linux filesystems; when the URL
//! does not end in `.pdf` the link title text is used instead.

use percent_encoding::percent_decode_str;

const NAME_MAX: usize = 255;

/// Decoded last path segment of a URL, for use as a filename hint.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()?;
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    if decoded.is_empty() || decoded == "." || decoded == ".." {
        return None;
    }
    Some(decoded.into_owned())
}

/// Sanitizes a candidate filename for safe use on Linux.
///
/// - Replaces NUL, `/`, `\`, whitespace and control characters with `_`
/// - Trims leading/trailing spaces, dots and underscores
/// - Collapses consecutive underscores
/// - Limits length to 255 bytes (Linux NAME_MAX)
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let replacement = if c == '\0' || c == '/' || c == '\\' || c.is_control() {
            '_'
        } else if c == ' ' || c == '\t' {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '\t' || c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derives the local filename for a paper link.
///
/// Uses the URL's last path segment when it names a PDF; otherwise falls back
/// to the link title plus a `.pdf` extension. Either way the result is
/// sanitized. Returns `None` when neither source yields a usable name.
pub fn derive_filename(url: &str, title: &str) -> Option<String> {
    if let Some(from_url) = filename_from_url(url) {
        if from_url.to_ascii_lowercase().ends_with(".pdf") {
            let sanitized = sanitize_filename(&from_url);
            if !sanitized.is_empty() {
                return Some(sanitized);
            }
        }
    }

    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    let sanitized = sanitize_filename(&format!("{}.pdf", title));
    if sanitized == ".pdf" || sanitized == "pdf" {
        None
    } else {
        Some(sanitized)
    }
}
