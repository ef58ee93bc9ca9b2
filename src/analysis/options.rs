//! Extraction options and thresholds.

use crate::model::DocumentType;
use serde::{Deserialize, Serialize};

/// Tunable thresholds for one extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Minimum heading score for most document types
    pub heading_threshold: f32,

    /// Minimum heading score for simple documents
    pub simple_document_threshold: f32,

    /// Maximum number of outline entries
    pub max_outline_entries: usize,

    /// How many first-page spans are considered as title candidates
    pub title_scan_limit: usize,

    /// Minimum title candidate score
    pub title_min_score: i32,

    /// Accepted metadata title length (characters, inclusive)
    pub metadata_title_min_len: usize,
    pub metadata_title_max_len: usize,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading acceptance threshold.
    pub fn with_heading_threshold(mut self, threshold: f32) -> Self {
        self.heading_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the acceptance threshold used for simple documents.
    pub fn with_simple_document_threshold(mut self, threshold: f32) -> Self {
        self.simple_document_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Set the outline size cap.
    pub fn with_max_outline_entries(mut self, max: usize) -> Self {
        self.max_outline_entries = max;
        self
    }

    /// Set how many first-page spans are scanned for the title.
    pub fn with_title_scan_limit(mut self, limit: usize) -> Self {
        self.title_scan_limit = limit;
        self
    }

    /// Set the minimum title candidate score.
    pub fn with_title_min_score(mut self, score: i32) -> Self {
        self.title_min_score = score;
        self
    }

    /// Set the accepted metadata title length range.
    pub fn with_metadata_title_len(mut self, min: usize, max: usize) -> Self {
        self.metadata_title_min_len = min;
        self.metadata_title_max_len = max.max(min);
        self
    }

    /// Heading threshold for a document type.
    pub fn threshold_for(&self, document_type: DocumentType) -> f32 {
        match document_type {
            DocumentType::SimpleDocument => self.simple_document_threshold,
            _ => self.heading_threshold,
        }
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            heading_threshold: 0.5,
            simple_document_threshold: 0.7,
            max_outline_entries: 40,
            title_scan_limit: 20,
            title_min_score: 2,
            metadata_title_min_len: 3,
            metadata_title_max_len: 300,
        }
    }
}
