//! Exam-board scraping profiles.
//!
//! A profile names one past-paper index page and the paper sections it
//! contains. Profiles are plain values handed to the adapter and runner;
//! there is no process-wide registry.

/// One paper section of an index page (e.g. "Paper 1 - Pure").
#[derive(Debug, Clone)]
pub struct PaperSection {
    /// Display name, becomes a directory component (spaces replaced).
    pub name: &'static str,
    /// Anchor id of the section heading on the index page.
    pub anchor_id: &'static str,
    /// Subtypes that split the section into sub-directories (e.g. Edexcel
    /// Paper 3 has separate Mechanics and Statistics papers). Empty for most.
    pub subtypes: &'static [&'static str],
}

/// One exam-board profile: index URL plus its paper sections.
#[derive(Debug, Clone)]
pub struct BoardProfile {
    /// Stable key used on the command line (e.g. "edexcel_alevel").
    pub key: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Exam board directory component (e.g. "edexcel").
    pub exam_board: &'static str,
    /// Level directory component (e.g. "alevel").
    pub level: &'static str,
    /// Past-paper index page for this board and level.
    pub base_url: &'static str,
    pub sections: &'static [PaperSection],
}

impl BoardProfile {
    /// Section whose display name matches `paper_type`, if any.
    pub fn section(&self, paper_type: &str) -> Option<&PaperSection> {
        self.sections.iter().find(|s| s.name == paper_type)
    }

    /// Section for a classified paper name ("Paper N"), tolerating the
    /// "Component N" naming OCR MEI uses.
    pub fn section_for_paper(&self, paper: &str) -> Option<&PaperSection> {
        let n = paper.chars().rev().find(|c| c.is_ascii_digit())?;
        self.sections.iter().find(|s| {
            s.name.starts_with(&format!("Paper {}", n))
                || s.name.starts_with(&format!("Component {}", n))
        })
    }
}

/// Built-in board profiles, mirroring the PMT maths past-paper pages.
pub fn builtin_profiles() -> &'static [BoardProfile] {
    &PROFILES
}

/// Look up a profile by its CLI key.
pub fn find_profile(key: &str) -> Option<&'static BoardProfile> {
    PROFILES.iter().find(|p| p.key == key)
}

static PROFILES: [BoardProfile; 4] = [
    BoardProfile {
        key: "edexcel_alevel",
        name: "Edexcel A-Level",
        exam_board: "edexcel",
        level: "alevel",
        base_url: "https://www.physicsandmathstutor.com/maths-revision/a-level-edexcel/papers/",
        sections: &[
            PaperSection {
                name: "Paper 1 - Pure",
                anchor_id: "paper-1-pure",
                subtypes: &[],
            },
            PaperSection {
                name: "Paper 2 - Pure",
                anchor_id: "paper-2-pure",
                subtypes: &[],
            },
            PaperSection {
                name: "Paper 3 - Statistics & Mechanics",
                anchor_id: "paper-3-statistics-mechanics",
                subtypes: &["Mechanics", "Statistics"],
            },
        ],
    },
    BoardProfile {
        key: "aqa_alevel",
        name: "AQA A-Level",
        exam_board: "aqa",
        level: "alevel",
        base_url: "https://www.physicsandmathstutor.com/maths-revision/a-level-aqa/papers/",
        sections: &[
            PaperSection {
                name: "Paper 1 - Pure",
                anchor_id: "paper-1-pure",
                subtypes: &[],
            },
            PaperSection {
                name: "Paper 2 - Pure and Mechanics",
                anchor_id: "paper-2-pure-mechanics",
                subtypes: &[],
            },
            PaperSection {
                name: "Paper 3 - Pure and Statistics",
                anchor_id: "paper-3-pure-statistics",
                subtypes: &[],
            },
        ],
    },
    BoardProfile {
        key: "ocr_alevel",
        name: "OCR A-Level",
        exam_board: "ocr",
        level: "alevel",
        base_url: "https://www.physicsandmathstutor.com/maths-revision/a-level-ocr/papers/",
        sections: &[
            PaperSection {
                name: "Paper 1 - Pure",
                anchor_id: "component-1-pure",
                subtypes: &[],
            },
            PaperSection {
                name: "Paper 2 - Pure and Statistics",
                anchor_id: "component-2-pure-and-statistics",
                subtypes: &[],
            },
            PaperSection {
                name: "Paper 3 - Pure and Mechanics",
                anchor_id: "component-3-pure-and-mechanics",
                subtypes: &[],
            },
        ],
    },
    BoardProfile {
        key: "ocr_mei_alevel",
        name: "OCR MEI A-Level",
        exam_board: "ocr-mei",
        level: "alevel",
        base_url: "https://www.physicsandmathstutor.com/maths-revision/a-level-ocr-mei/papers/",
        sections: &[
            PaperSection {
                name: "Component 1 - Pure and Mechanics",
                anchor_id: "component-1-pure-and-mechanics",
                subtypes: &[],
            },
            PaperSection {
                name: "Component 2 - Pure and Statistics",
                anchor_id: "component-2-pure-and-statistics",
                subtypes: &[],
            },
            PaperSection {
                name: "Component 3 - Pure and Comprehension",
                anchor_id: "component-3-pure-and-comprehension",
                subtypes: &[],
            },
        ],
    },
];
