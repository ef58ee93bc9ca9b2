//! Deep-layout box adapter.
//!
//! Layout backends report classified boxes rather than font runs. Boxes are
//! mapped to synthetic spans so that the same scoring applies: titles become
//! large bold text, section headers moderately large bold text, everything
//! else body text.

use super::SpanSource;
use crate::error::{Error, Result};
use crate::model::{PageSpans, Position, SourceDocument, TextSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Font size assigned to body boxes.
pub const BODY_FONT_SIZE: f32 = 12.0;
const TITLE_SCALE: f32 = 1.5;
const HEADER_SCALE: f32 = 1.2;

/// A classified layout box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub layout_type: String,
    #[serde(default = "default_page")]
    pub page_number: u32,
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub x0: Option<f32>,
}

fn default_page() -> u32 {
    1
}

impl LayoutBox {
    fn font_size_and_weight(&self) -> (f32, bool) {
        match self.layout_type.to_ascii_lowercase().as_str() {
            "title" => (BODY_FONT_SIZE * TITLE_SCALE, true),
            "header" | "heading" | "section" | "section_header" | "section-header" => {
                (BODY_FONT_SIZE * HEADER_SCALE, true)
            }
            _ => (BODY_FONT_SIZE, false),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoxesFile {
    Bare(Vec<LayoutBox>),
    Wrapped { boxes: Vec<LayoutBox> },
}

/// Layout box input.
#[derive(Debug, Clone, Default)]
pub struct LayoutBoxes {
    boxes: Vec<LayoutBox>,
    name: Option<String>,
}

impl LayoutBoxes {
    pub fn new(boxes: Vec<LayoutBox>) -> Self {
        Self { boxes, name: None }
    }

    /// Parse boxes from JSON bytes (bare array or `{"boxes": [...]}`).
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let file: BoxesFile = serde_json::from_slice(data)?;
        let boxes = match file {
            BoxesFile::Bare(boxes) | BoxesFile::Wrapped { boxes } => boxes,
        };
        Ok(Self::new(boxes))
    }

    /// Parse boxes from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_slice(json.as_bytes())
    }

    /// Set the document name.
    pub fn with_name(mut self, name: &str) -> Self {
        if !name.is_empty() {
            self.name = Some(name.to_string());
        }
        self
    }
}

impl SpanSource for LayoutBoxes {
    fn format_name(&self) -> &'static str {
        "layout boxes"
    }

    fn read_document(&self) -> Result<SourceDocument> {
        let mut pages: BTreeMap<u32, PageSpans> = BTreeMap::new();

        for b in &self.boxes {
            if b.page_number == 0 {
                return Err(Error::InvalidSource(format!(
                    "layout box '{}' has page number 0",
                    b.text.trim()
                )));
            }
            let (font_size, bold) = b.font_size_and_weight();
            let position = Position {
                x: b.x0.unwrap_or(0.0),
                y: b.top,
            };
            pages
                .entry(b.page_number)
                .or_insert_with(|| PageSpans::new(b.page_number))
                .push(TextSpan::new(b.text.as_str(), b.page_number, font_size, bold, Some(position)));
        }

        let mut doc = SourceDocument::new();
        doc.name = self.name.clone();
        doc.pages = pages.into_values().collect();
        Ok(doc)
    }
}
