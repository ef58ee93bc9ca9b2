//! JSON span dump adapter.
//!
//! ```json
//! {"name": "report.pdf", "title": "Annual Report",
//!  "pages": [{"number": 1, "spans": [{"text": "1. Introduction",
//!             "font_size": 18.0, "bold": true, "x": 72.0, "y": 96.0}]}]}
//! ```

use super::SpanSource;
use crate::error::{Error, Result};
use crate::model::{PageSpans, Position, SourceDocument, TextSpan};
use serde::{Deserialize, Serialize};

/// One span as serialized by the layout backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpSpan {
    #[serde(default)]
    pub text: String,
    /// Missing sizes read as 0 and the span is dropped as malformed.
    #[serde(default, alias = "size")]
    pub font_size: f32,
    #[serde(default, alias = "is_bold")]
    pub bold: bool,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default, alias = "top")]
    pub y: Option<f32>,
}

/// One page of a span dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DumpPage {
    /// 1-based page number; defaults to the page's position in the list
    #[serde(default, alias = "page_number")]
    pub number: Option<u32>,
    #[serde(default)]
    pub spans: Vec<DumpSpan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct DumpFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    pages: Vec<DumpPage>,
}

/// Span dump input.
#[derive(Debug, Clone)]
pub struct SpanDump {
    file: DumpFile,
}

impl SpanDump {
    /// Parse a span dump from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self {
            file: serde_json::from_str(json)?,
        })
    }

    /// Parse a span dump from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Ok(Self {
            file: serde_json::from_slice(data)?,
        })
    }

    /// Build a dump from pages directly.
    pub fn from_pages(pages: Vec<DumpPage>) -> Self {
        Self {
            file: DumpFile {
                pages,
                ..Default::default()
            },
        }
    }

    /// Use `name` when the dump does not carry one.
    pub fn with_fallback_name(mut self, name: &str) -> Self {
        if self.file.name.is_none() && !name.is_empty() {
            self.file.name = Some(name.to_string());
        }
        self
    }
}

impl SpanSource for SpanDump {
    fn format_name(&self) -> &'static str {
        "span dump"
    }

    fn read_document(&self) -> Result<SourceDocument> {
        let mut doc = SourceDocument::new();
        doc.name = self.file.name.clone();
        doc.metadata.title = self.file.title.clone();

        for (index, page) in self.file.pages.iter().enumerate() {
            let number = page.number.unwrap_or(index as u32 + 1);
            if number == 0 {
                return Err(Error::InvalidSource(format!(
                    "page {} has number 0; page numbers are 1-based",
                    index + 1
                )));
            }

            let mut spans = PageSpans::new(number);
            for span in &page.spans {
                let position = span.y.map(|y| Position {
                    x: span.x.unwrap_or(0.0),
                    y,
                });
                spans.push(TextSpan::new(span.text.as_str(), number, span.font_size, span.bold, position));
            }
            doc.add_page(spans);
        }

        Ok(doc)
    }
}
