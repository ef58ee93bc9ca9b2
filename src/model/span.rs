//! Positioned text fragments.

use crate::text::{detect_script, normalize, strip_format_chars, Script};
use serde::{Deserialize, Serialize};

/// Top-left corner of a fragment in page coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A positioned run of text with font and style information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSpan {
    /// The text content, trimmed, without zero-width or format characters
    pub text: String,
    /// Canonical form used for comparison and length rules
    pub normalized_text: String,
    /// Page number (1-based)
    pub page: u32,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font is bold
    pub bold: bool,
    /// Position on the page, when the backend reported one
    pub position: Option<Position>,
    /// Detected writing system
    pub script: Script,
}

impl TextSpan {
    /// Create a new text span, computing its normalized text and script.
    pub fn new(
        text: impl Into<String>,
        page: u32,
        font_size: f32,
        bold: bool,
        position: Option<Position>,
    ) -> Self {
        let text = strip_format_chars(&text.into()).trim().to_string();
        let normalized_text = normalize(&text);
        let script = detect_script(&text);
        Self {
            text,
            normalized_text,
            page,
            font_size,
            bold,
            position,
            script,
        }
    }

    /// Create a span at `(x, y)`.
    pub fn at(text: impl Into<String>, page: u32, font_size: f32, bold: bool, x: f32, y: f32) -> Self {
        Self::new(text, page, font_size, bold, Some(Position { x, y }))
    }

    /// Whether the span can take part in profiling and scoring.
    ///
    /// Empty text, a non-positive or non-finite font size, or a missing
    /// position make a span malformed.
    pub fn is_well_formed(&self) -> bool {
        !self.normalized_text.is_empty()
            && self.font_size.is_finite()
            && self.font_size > 0.0
            && self.position.is_some()
    }

    /// Vertical position, or infinity when unknown.
    pub fn y(&self) -> f32 {
        self.position.map_or(f32::INFINITY, |p| p.y)
    }

    /// Length of the normalized text in characters.
    pub fn len(&self) -> usize {
        self.normalized_text.chars().count()
    }

    /// Whether the normalized text is empty.
    pub fn is_empty(&self) -> bool {
        self.normalized_text.is_empty()
    }
}
