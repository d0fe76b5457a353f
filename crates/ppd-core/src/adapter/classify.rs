//! Metadata extraction from link titles and hrefs.
//!
//! PMT link titles look like "June 2022 QP - Paper 1" or
//! "June 2018 MS (Mech) - Paper 3"; hrefs carry "Paper-1" or "component-2"
//! markers depending on the board. Everything here is substring/regex
//! matching on those two strings.

use crate::paper::ContentKind;
use regex::Regex;
use std::sync::LazyLock;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20(\d{2})").expect("year regex"));

static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(January|February|March|April|May|June|July|August|September|October|November|December)",
    )
    .expect("month regex")
});

static PAPER_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)paper-(\d)").expect("paper href regex"));

static COMPONENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)component[ -](\d)").expect("component regex"));

/// "QP" / "MS" marker in the link title.
pub fn content_kind(title: &str) -> Option<ContentKind> {
    if title.contains("QP") {
        Some(ContentKind::QuestionPaper)
    } else if title.contains("MS") {
        Some(ContentKind::MarkScheme)
    } else {
        None
    }
}

/// Four-digit exam year (20xx) from the title.
pub fn year(title: &str) -> Option<u16> {
    YEAR_RE.find(title)?.as_str().parse().ok()
}

/// Month name from the title, capitalized.
pub fn month(title: &str) -> Option<String> {
    let m = MONTH_RE.find(title)?.as_str();
    let mut chars = m.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase())
}

/// Paper display name ("Paper N") from href or title.
///
/// AQA/Edexcel hrefs carry "Paper-N"; OCR uses "component-N" in hrefs and
/// "Component N" in titles. Both map to "Paper N" directories.
pub fn paper_from_link(href: &str, title: &str) -> Option<String> {
    let number = PAPER_HREF_RE
        .captures(href)
        .or_else(|| COMPONENT_RE.captures(href))
        .or_else(|| COMPONENT_RE.captures(title))
        .and_then(|c| c.get(1))?;
    Some(format!("Paper {}", number.as_str()))
}

/// Match one of the section's subtypes in the title, either spelled out
/// ("Mechanics") or abbreviated in parentheses ("(Mech)").
pub fn subtype(title: &str, subtypes: &[&str]) -> Option<String> {
    let lower = title.to_lowercase();
    for candidate in subtypes {
        let full = candidate.to_lowercase();
        let abbrev = format!("({}", &full[..full.len().min(4)]);
        if lower.contains(&full) || lower.contains(&abbrev) {
            return Some((*candidate).to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qp_and_ms_markers() {
        assert_eq!(
            content_kind("June 2022 QP - Paper 1"),
            Some(ContentKind::QuestionPaper)
        );
        assert_eq!(
            content_kind("June 2022 MS - Paper 1"),
            Some(ContentKind::MarkScheme)
        );
        assert_eq!(content_kind("Specimen Paper"), None);
    }

    #[test]
    fn year_from_title() {
        assert_eq!(year("June 2022 QP - Paper 1"), Some(2022));
        assert_eq!(year("Specimen QP"), None);
    }

    #[test]
    fn month_capitalized_case_insensitive() {
        assert_eq!(month("JUNE 2022 QP").as_deref(), Some("June"));
        assert_eq!(month("October 2021 MS").as_deref(), Some("October"));
        assert_eq!(month("2022 QP"), None);
    }

    #[test]
    fn paper_number_from_href() {
        assert_eq!(
            paper_from_link("https://pmt.example/Edexcel/Paper-1/June%202022.pdf", "x")
                .as_deref(),
            Some("Paper 1")
        );
        assert_eq!(
            paper_from_link("https://pmt.example/ocr/component-2-pure.pdf", "x").as_deref(),
            Some("Paper 2")
        );
    }

    #[test]
    fn paper_number_from_component_title() {
        assert_eq!(
            paper_from_link("https://pmt.example/x.pdf", "Component 3 June 2019 QP").as_deref(),
            Some("Paper 3")
        );
        assert_eq!(paper_from_link("https://pmt.example/x.pdf", "June 2019 QP"), None);
    }

    #[test]
    fn subtype_full_and_abbreviated() {
        let subtypes = ["Mechanics", "Statistics"];
        assert_eq!(
            subtype("June 2018 MS (Mechanics) - Paper 3", &subtypes).as_deref(),
            Some("Mechanics")
        );
        assert_eq!(
            subtype("June 2018 QP (Stats) - Paper 3", &subtypes).as_deref(),
            Some("Statistics")
        );
        assert_eq!(subtype("June 2018 QP - Paper 1", &subtypes), None);
    }
}
