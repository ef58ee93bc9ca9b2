//! Input format detection.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Recognized input formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFormat {
    /// JSON span dump (`{"pages": [...]}`)
    SpanDump,
    /// JSON layout boxes from a deep-layout backend (`[...]` or `{"boxes": [...]}`)
    LayoutBoxes,
    /// Raw PDF; recognized but not decoded by this crate
    Pdf { version: String },
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::SpanDump => write!(f, "span dump"),
            InputFormat::LayoutBoxes => write!(f, "layout boxes"),
            InputFormat::Pdf { version } => write!(f, "PDF {}", version),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Detect the input format of a file.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect the input format of in-memory content.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if data.starts_with(PDF_MAGIC) {
        return detect_pdf(data);
    }

    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let first = data.iter().copied().find(|b| !b.is_ascii_whitespace());
    match first {
        Some(b'[') => Ok(InputFormat::LayoutBoxes),
        Some(b'{') => {
            let value: Value = serde_json::from_slice(data)?;
            classify_object(&value)
        }
        _ => Err(Error::UnknownFormat),
    }
}

/// Classify an already parsed JSON value.
pub fn classify_value(value: &Value) -> Result<InputFormat> {
    match value {
        Value::Array(_) => Ok(InputFormat::LayoutBoxes),
        Value::Object(_) => classify_object(value),
        _ => Err(Error::UnknownFormat),
    }
}

fn classify_object(value: &Value) -> Result<InputFormat> {
    if value.get("pages").is_some_and(Value::is_array) {
        Ok(InputFormat::SpanDump)
    } else if value.get("boxes").is_some_and(Value::is_array) {
        Ok(InputFormat::LayoutBoxes)
    } else {
        Err(Error::UnknownFormat)
    }
}

fn detect_pdf(data: &[u8]) -> Result<InputFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }
    let version = String::from_utf8_lossy(&data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN]).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnknownFormat);
    }
    Ok(InputFormat::Pdf { version })
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(InputFormat::Pdf { .. }))
}
