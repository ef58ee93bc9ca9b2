//! # unoutline
//!
//! Document title and heading outline extraction from positioned text spans.
//!
//! A layout backend exports the text of a document as spans (text, font
//! size, weight, position, page). This library profiles those spans, picks
//! the document title and scores every span as a potential heading, producing
//! a flat `H1`..`H6` outline.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unoutline::{extract_file, to_json, JsonFormat};
//!
//! let result = extract_file("report.json");
//! println!("{}", result.title);
//! for entry in &result.outline {
//!     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
//! }
//! println!("{}", to_json(&result, JsonFormat::Pretty)?);
//! # Ok::<(), unoutline::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Multilingual**: header keywords for 13 languages, script-aware case tests
//! - **Numbering**: decimal, multi-level, roman, letter, CJK, Arabic-Indic and Devanagari markers
//! - **Document profiling**: forms are recognized and yield no outline
//! - **Data-driven lexicon**: keyword and script tables load from JSON
//! - **Parallel batches**: uses Rayon for many documents
//! - **Evaluation**: precision / recall against a reference outline

pub mod analysis;
pub mod detect;
pub mod error;
pub mod eval;
pub mod model;
pub mod render;
pub mod source;
pub mod text;

// Re-export commonly used types
pub use analysis::{ExtractOptions, Extractor};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use model::{
    DocumentProfile, DocumentType, ExtractionResult, HeadingLevel, Metadata, OutlineEntry,
    PageSpans, Position, SourceDocument, TextSpan,
};
pub use render::{to_json, write_json, JsonFormat};
pub use source::{LayoutBoxes, SpanDump, SpanSource};
pub use text::{detect_script, extract_numbering, normalize, Lexicon, LexiconConfig, Script};

use std::path::Path;

/// Extract the title and outline of a span dump or layout box file.
///
/// Never fails: a missing file yields the `"File not found"` title and any
/// other failure an `"Error: ..."` title, both with an empty outline.
///
/// # Example
///
/// ```no_run
/// use unoutline::extract_file;
///
/// let result = extract_file("report.json");
/// println!("Title: {}", result.title);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> ExtractionResult {
    Extractor::new().extract_path(path)
}

/// Extract from in-memory span dump or layout box JSON.
///
/// `name` stands in for the file name when the content has none.
pub fn extract_bytes(data: &[u8], name: &str) -> ExtractionResult {
    Extractor::new().extract_bytes(data, name)
}

/// Extract from a file, propagating errors instead of folding them into the title.
///
/// # Example
///
/// ```no_run
/// use unoutline::try_extract_file;
///
/// match try_extract_file("report.json") {
///     Ok(result) => println!("{} headings", result.outline.len()),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn try_extract_file<P: AsRef<Path>>(path: P) -> Result<ExtractionResult> {
    Extractor::new().try_extract_path(path)
}

/// Extract from a file and serialize the result.
pub fn extract_file_to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    render::to_json(&extract_file(path), format)
}
