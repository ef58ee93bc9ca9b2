//! Document-level input types.

use super::TextSpan;
use serde::{Deserialize, Serialize};

/// Document metadata reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title from the file's info dictionary
    pub title: Option<String>,
}

/// Spans of a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSpans {
    /// Page number (1-indexed)
    pub number: u32,
    /// Spans in backend order
    pub spans: Vec<TextSpan>,
}

impl PageSpans {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            spans: Vec::new(),
        }
    }

    /// Add a span to the page.
    pub fn push(&mut self, span: TextSpan) {
        self.spans.push(span);
    }
}

/// Everything an input adapter yields for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    /// File name used for the filename title fallback
    pub name: Option<String>,
    /// Document metadata
    pub metadata: Metadata,
    /// Pages in the document
    pub pages: Vec<PageSpans>,
}

impl SourceDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: PageSpans) {
        self.pages.push(page);
    }

    /// All spans across pages, in page order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.pages.iter().flat_map(|p| p.spans.iter())
    }

    /// Spans located on page 1.
    pub fn first_page_spans(&self) -> Vec<&TextSpan> {
        self.spans().filter(|s| s.page == 1).collect()
    }

    /// Number of pages: the page list length or the highest page number,
    /// whichever is larger.
    pub fn page_count(&self) -> u32 {
        let highest = self.spans().map(|s| s.page).max().unwrap_or(0);
        highest.max(self.pages.len() as u32)
    }

    /// Total number of spans.
    pub fn span_count(&self) -> usize {
        self.pages.iter().map(|p| p.spans.len()).sum()
    }

    /// Check if the document has no spans.
    pub fn is_empty(&self) -> bool {
        self.span_count() == 0
    }
}
