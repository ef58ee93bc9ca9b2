//! Data model shared by the adapters, the analysis passes and the renderers.
//!
//! Input adapters produce a [`SourceDocument`] of [`TextSpan`]s; the
//! analysis builds a [`DocumentProfile`] and scores spans into candidates;
//! the caller receives an [`ExtractionResult`].

mod document;
mod outline;
mod profile;
mod span;

pub use document::{Metadata, PageSpans, SourceDocument};
pub use outline::{ExtractionResult, HeadingCandidate, HeadingLevel, OutlineEntry, TitleCandidate};
pub use profile::{DocumentProfile, DocumentType, FontHistogram};
pub use span::{Position, TextSpan};
