//! Global document statistics.

use crate::text::Script;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Coarse structural classification of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Fill-in form; never has an outline
    Form,
    /// Short document dominated by terse fragments
    SimpleDocument,
    /// Many numbered sections
    StructuredDocument,
    /// Mostly one- or two-word fragments
    TableHeavy,
    /// Regular prose document
    Document,
    /// No usable fragments
    #[default]
    Unknown,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Form => "form",
            DocumentType::SimpleDocument => "simple_document",
            DocumentType::StructuredDocument => "structured_document",
            DocumentType::TableHeavy => "table_heavy",
            DocumentType::Document => "document",
            DocumentType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font-size histogram over exact sizes, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontHistogram {
    counts: Vec<(f32, usize)>,
}

impl FontHistogram {
    /// Record one font size observation.
    pub fn add_size(&mut self, size: f32) {
        match self.counts.iter_mut().find(|(s, _)| *s == size) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((size, 1)),
        }
    }

    /// Most frequent size; ties go to the size seen first.
    pub fn mode(&self) -> Option<f32> {
        let mut best: Option<(f32, usize)> = None;
        for &(size, count) in &self.counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((size, count));
            }
        }
        best.map(|(size, _)| size)
    }

    /// Distinct sizes, largest first.
    pub fn sizes_descending(&self) -> Vec<f32> {
        let mut sizes: Vec<f32> = self.counts.iter().map(|(s, _)| *s).collect();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes
    }

    /// Occurrences of a size.
    pub fn count(&self, size: f32) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == size)
            .map_or(0, |(_, c)| *c)
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Statistical profile of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentProfile {
    /// Highest page number seen
    pub page_count: u32,
    /// Font size occurrences over well-formed spans
    pub font_size_histogram: FontHistogram,
    /// Histogram mode; proxy for body text size
    pub dominant_font_size: f32,
    /// Structural classification
    pub document_type: DocumentType,
    /// At least three numbered fragments
    pub has_numbered_sections: bool,
    /// Distinct font sizes with a gap of 1.5pt or more
    pub has_hierarchical_structure: bool,
    /// Fragments per detected script
    pub script_counts: BTreeMap<Script, usize>,
    /// Script with the most fragments
    pub primary_script: Script,
}

impl Default for DocumentProfile {
    fn default() -> Self {
        Self {
            page_count: 0,
            font_size_histogram: FontHistogram::default(),
            dominant_font_size: 10.0,
            document_type: DocumentType::Unknown,
            has_numbered_sections: false,
            has_hierarchical_structure: false,
            script_counts: BTreeMap::new(),
            primary_script: Script::Unknown,
        }
    }
}
