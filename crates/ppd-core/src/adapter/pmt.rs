//! Index-page link extraction for the PMT past-paper pages.
//!
//! One GET fetches the board's index page; every `.pdf` anchor on it is a
//! candidate. Classification works off the link title and href alone, which
//! survives the small layout differences between the board pages.

use super::classify;
use super::PaperSource;
use crate::fetch::fetch_text;
use crate::pacing::Pacer;
use crate::paper::{PaperItem, PaperMeta};
use crate::profile::BoardProfile;
use crate::url_model;
use anyhow::{anyhow, Result};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub struct PmtSource {
    profile: &'static BoardProfile,
    base_dir: PathBuf,
    timeout: Duration,
}

impl PmtSource {
    pub fn new(profile: &'static BoardProfile, base_dir: PathBuf, timeout: Duration) -> Self {
        Self {
            profile,
            base_dir,
            timeout,
        }
    }
}

impl PaperSource for PmtSource {
    fn board(&self) -> &str {
        self.profile.key
    }

    fn discover(&mut self, pacer: &mut Pacer) -> Result<Vec<PaperItem>> {
        tracing::info!("fetching index page {}", self.profile.base_url);
        pacer.pause();
        let html = fetch_text(self.profile.base_url, self.timeout).map_err(|e| {
            anyhow!(
                "failed to fetch index page {}: {}",
                self.profile.base_url,
                e
            )
        })?;
        parse_index(&html, self.profile, &self.base_dir)
    }
}

/// Extract candidate papers from an index page, in document order.
///
/// Links are skipped (with a debug log) when they are not PDFs, carry no
/// QP/MS marker, no year, or no recognizable paper number; the index pages
/// also link revision notes and solution banks we do not want.
pub(crate) fn parse_index(
    html: &str,
    profile: &BoardProfile,
    base_dir: &Path,
) -> Result<Vec<PaperItem>> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").map_err(|e| anyhow!("anchor selector: {}", e))?;
    let base = Url::parse(profile.base_url)?;

    let mut items = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for anchor in document.select(&anchors) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let title: String = anchor.text().collect();
        let title = title.split_whitespace().collect::<Vec<_>>().join(" ");

        let Ok(full_url) = base.join(href) else {
            tracing::debug!("skipping unparsable href {}", href);
            continue;
        };
        if !full_url.path().to_ascii_lowercase().ends_with(".pdf") {
            continue;
        }

        let Some(content) = classify::content_kind(&title) else {
            tracing::debug!("skipping {} - no QP/MS marker", title);
            continue;
        };
        let Some(year) = classify::year(&title) else {
            tracing::debug!("skipping {} - missing year", title);
            continue;
        };
        let Some(paper_type) = classify::paper_from_link(full_url.as_str(), &title) else {
            tracing::debug!("skipping {} - no paper number", title);
            continue;
        };
        let subtype = profile
            .section_for_paper(&paper_type)
            .filter(|s| !s.subtypes.is_empty())
            .and_then(|s| classify::subtype(&title, s.subtypes));
        let month = classify::month(&title);

        let Some(filename) = url_model::derive_filename(full_url.as_str(), &title) else {
            tracing::debug!("skipping {} - no usable filename", full_url);
            continue;
        };
        if !seen.insert((filename.clone(), full_url.to_string())) {
            continue; // same link listed twice on the page
        }

        let meta = PaperMeta {
            exam_board: profile.exam_board.to_string(),
            level: profile.level.to_string(),
            paper_type,
            subtype,
            content,
            year,
            month,
        };
        items.push(PaperItem::new(
            meta,
            filename,
            full_url.to_string(),
            base_dir,
        ));
    }

    tracing::info!("found {} candidate papers for {}", items.len(), profile.name);
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paper::ContentKind;
    use crate::profile::find_profile;

    const INDEX_HTML: &str = r#"
        <html><body>
        <h4><a id="paper-1-pure"></a>Paper 1 - Pure</h4>
        <div class="one_fourth">
          <h5>Question Papers</h5>
          <a href="https://www.physicsandmathstutor.com/download/Maths/A-level/Paper-1/Edexcel/June%202022%20QP%20-%20Paper%201.pdf">June 2022 QP - Paper 1</a>
          <a href="/download/Maths/A-level/Paper-1/Edexcel/June%202021%20QP%20-%20Paper%201.pdf">June 2021 QP - Paper 1</a>
          <a href="https://www.physicsandmathstutor.com/download/Maths/A-level/Paper-1/Edexcel/Specimen%20QP%20-%20Paper%201.pdf">Specimen QP - Paper 1</a>
        </div>
        <div class="one_fourth">
          <h5>Mark Schemes</h5>
          <a href="https://www.physicsandmathstutor.com/download/Maths/A-level/Paper-1/Edexcel/June%202022%20MS%20-%20Paper%201.pdf">June 2022 MS - Paper 1</a>
        </div>
        <h4><a id="paper-3-statistics-mechanics"></a>Paper 3 - Statistics &amp; Mechanics</h4>
        <div class="one_fourth">
          <h5>Question Papers</h5>
          <a href="https://www.physicsandmathstutor.com/download/Maths/A-level/Paper-3/Edexcel/June%202019%20QP%20(Mech)%20-%20Paper%203.pdf">June 2019 QP (Mech) - Paper 3</a>
        </div>
        <a href="https://www.physicsandmathstutor.com/maths-revision/solutionbanks/">Solution Banks</a>
        </body></html>
    "#;

    #[test]
    fn extracts_classified_pdf_links_in_order() {
        let profile = find_profile("edexcel_alevel").unwrap();
        let items = parse_index(INDEX_HTML, profile, Path::new("/papers")).unwrap();

        // Specimen link (no year) and the non-PDF link are skipped.
        assert_eq!(items.len(), 4);

        let first = &items[0];
        assert_eq!(first.filename, "June_2022_QP_-_Paper_1.pdf");
        assert_eq!(first.meta.exam_board, "edexcel");
        assert_eq!(first.meta.level, "alevel");
        assert_eq!(first.meta.paper_type, "Paper 1");
        assert_eq!(first.meta.content, ContentKind::QuestionPaper);
        assert_eq!(first.meta.year, 2022);
        assert_eq!(first.meta.month.as_deref(), Some("June"));
        assert_eq!(first.meta.subtype, None);
        assert_eq!(
            first.target_path,
            Path::new("/papers/Edexcel/ALEVEL/Paper_1/question_papers/June_2022_QP_-_Paper_1.pdf")
        );
    }

    #[test]
    fn relative_hrefs_resolve_against_base_url() {
        let profile = find_profile("edexcel_alevel").unwrap();
        let items = parse_index(INDEX_HTML, profile, Path::new("/papers")).unwrap();
        assert_eq!(
            items[1].source_url,
            "https://www.physicsandmathstutor.com/download/Maths/A-level/Paper-1/Edexcel/June%202021%20QP%20-%20Paper%201.pdf"
        );
    }

    #[test]
    fn mark_schemes_and_subtypes_classified() {
        let profile = find_profile("edexcel_alevel").unwrap();
        let items = parse_index(INDEX_HTML, profile, Path::new("/papers")).unwrap();

        let ms = &items[2];
        assert_eq!(ms.meta.content, ContentKind::MarkScheme);
        assert!(ms.target_path.to_string_lossy().contains("mark_schemes"));

        let mech = &items[3];
        assert_eq!(mech.meta.paper_type, "Paper 3");
        assert_eq!(mech.meta.subtype.as_deref(), Some("Mechanics"));
        assert_eq!(
            mech.target_path,
            Path::new(
                "/papers/Edexcel/ALEVEL/Paper_3/Mechanics/question_papers/June_2019_QP_(Mech)_-_Paper_3.pdf"
            )
        );
    }

    #[test]
    fn restartable_same_sequence() {
        let profile = find_profile("edexcel_alevel").unwrap();
        let a = parse_index(INDEX_HTML, profile, Path::new("/papers")).unwrap();
        let b = parse_index(INDEX_HTML, profile, Path::new("/papers")).unwrap();
        let names_a: Vec<_> = a.iter().map(|i| i.filename.clone()).collect();
        let names_b: Vec<_> = b.iter().map(|i| i.filename.clone()).collect();
        assert_eq!(names_a, names_b);
    }
}
