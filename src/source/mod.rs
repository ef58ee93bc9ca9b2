//! Input adapters that turn serialized fragment dumps into a [`SourceDocument`].
//!
//! Each input shape implements [`SpanSource`]; the extractor only ever sees
//! the resulting spans. PDF decoding is not done here: a PDF must first be
//! run through a layout backend that exports one of the JSON shapes.

mod layout_boxes;
mod span_dump;

pub use layout_boxes::{LayoutBox, LayoutBoxes, BODY_FONT_SIZE};
pub use span_dump::{DumpPage, DumpSpan, SpanDump};

use crate::detect::{detect_format_from_bytes, InputFormat};
use crate::error::{Error, Result};
use crate::model::SourceDocument;
use std::path::Path;

/// Something that can produce the spans of one document.
pub trait SpanSource {
    /// Short format name used in diagnostics.
    fn format_name(&self) -> &'static str;

    /// Read the document's pages and spans.
    fn read_document(&self) -> Result<SourceDocument>;
}

/// Open a file, sniff its format and return the matching adapter.
pub fn open<P: AsRef<Path>>(path: P) -> Result<Box<dyn SpanSource + Send + Sync>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let data = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    from_bytes(&data, &name)
}

/// Build an adapter for in-memory content. `name` is used when the content
/// carries no document name of its own.
pub fn from_bytes(data: &[u8], name: &str) -> Result<Box<dyn SpanSource + Send + Sync>> {
    match detect_format_from_bytes(data)? {
        InputFormat::SpanDump => Ok(Box::new(SpanDump::from_slice(data)?.with_fallback_name(name))),
        InputFormat::LayoutBoxes => Ok(Box::new(LayoutBoxes::from_slice(data)?.with_name(name))),
        InputFormat::Pdf { version } => Err(Error::UnsupportedInput(format!(
            "PDF {} must be exported to a span dump or layout boxes first",
            version
        ))),
    }
}

/// Open a file and read its document in one step.
pub fn read_path<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    open(path)?.read_document()
}
