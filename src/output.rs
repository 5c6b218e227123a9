//! Result types returned by the assembler.

use crate::document::{Section, SourcePath};
use serde::{Deserialize, Serialize};

/// The assembled manual plus what went into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualOutput {
    /// Complete HTML document: fixed shell, cover, then every section in order.
    pub html: String,
    /// One entry per section, in document order.
    pub sections: Vec<SectionSummary>,
    pub stats: AssemblyStats,
}

/// Where one section came from and how large it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// Anchor id of the `<section>` element.
    pub id: String,
    pub path: SourcePath,
    pub markdown_bytes: usize,
    pub html_bytes: usize,
}

impl From<&Section> for SectionSummary {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id(),
            path: section.source.clone(),
            markdown_bytes: section.markdown_bytes,
            html_bytes: section.html.len(),
        }
    }
}

/// Counters and timings for one assembly run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    pub file_count: usize,
    pub total_markdown_bytes: usize,
    /// Size of the final document, shell included.
    pub total_html_bytes: usize,
    pub discover_duration_ms: u64,
    pub render_duration_ms: u64,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_from_section() {
        let section = Section {
            source: SourcePath::new("papers/doc/a.md"),
            html: "<p>a</p>".into(),
            markdown_bytes: 3,
        };
        let summary = SectionSummary::from(&section);
        assert_eq!(summary.id, "papers__doc__a.md");
        assert_eq!(summary.html_bytes, 8);
        assert_eq!(summary.markdown_bytes, 3);
    }

    #[test]
    fn path_serialises_as_plain_string() {
        let summary = SectionSummary {
            id: "a.md".into(),
            path: SourcePath::new("a.md"),
            markdown_bytes: 1,
            html_bytes: 2,
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"path\":\"a.md\""), "got: {json}");
    }
}
