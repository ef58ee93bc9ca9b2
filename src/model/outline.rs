//! Extraction output and scoring candidates.

use super::TextSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Heading level, serialized as `"H1"`..`"H6"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Level from a 1-based depth, clamped to `H1..=H6`.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            4 => HeadingLevel::H4,
            5 => HeadingLevel::H5,
            _ => HeadingLevel::H6,
        }
    }

    /// Numeric depth (1-6).
    pub fn depth(self) -> u8 {
        self as u8 + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
            HeadingLevel::H5 => "H5",
            HeadingLevel::H6 => "H6",
        }
    }

    /// Parse `"H1"`..`"H6"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H1" => Some(HeadingLevel::H1),
            "H2" => Some(HeadingLevel::H2),
            "H3" => Some(HeadingLevel::H3),
            "H4" => Some(HeadingLevel::H4),
            "H5" => Some(HeadingLevel::H5),
            "H6" => Some(HeadingLevel::H6),
            _ => None,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub level: HeadingLevel,
    pub text: String,
    pub page: u32,
}

/// Result of one extraction call: the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Document title; never empty
    pub title: String,
    /// Accepted headings in scored order
    pub outline: Vec<OutlineEntry>,
}

impl ExtractionResult {
    pub const NOT_FOUND_TITLE: &'static str = "File not found";
    pub const GENERIC_FAILURE_TITLE: &'static str = "Error processing document";

    pub fn new(title: impl Into<String>, outline: Vec<OutlineEntry>) -> Self {
        Self {
            title: title.into(),
            outline,
        }
    }

    /// Sentinel result for a missing input.
    pub fn not_found() -> Self {
        Self::new(Self::NOT_FOUND_TITLE, Vec::new())
    }

    /// Sentinel result for an internal failure.
    pub fn failure(message: &str) -> Self {
        if message.trim().is_empty() {
            Self::new(Self::GENERIC_FAILURE_TITLE, Vec::new())
        } else {
            Self::new(format!("Error: {}", message), Vec::new())
        }
    }

    /// Whether this is one of the sentinel failure payloads.
    pub fn is_failure(&self) -> bool {
        self.outline.is_empty()
            && (self.title == Self::NOT_FOUND_TITLE
                || self.title == Self::GENERIC_FAILURE_TITLE
                || self.title.starts_with("Error: "))
    }
}

/// A fragment scored as a possible title.
#[derive(Debug, Clone)]
pub struct TitleCandidate<'a> {
    pub text: String,
    /// Unbounded accumulated score
    pub score: i32,
    pub span: &'a TextSpan,
}

/// A fragment accepted as a heading.
#[derive(Debug, Clone)]
pub struct HeadingCandidate<'a> {
    pub text: String,
    pub page: u32,
    pub level: HeadingLevel,
    /// Score in [0, 1]
    pub score: f32,
    pub span: &'a TextSpan,
}

impl HeadingCandidate<'_> {
    pub fn to_entry(&self) -> OutlineEntry {
        OutlineEntry {
            level: self.level,
            text: self.text.clone(),
            page: self.page,
        }
    }
}
