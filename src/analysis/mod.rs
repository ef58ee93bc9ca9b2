//! Two-pass document analysis.
//!
//! The profiler builds global statistics over all spans; the title selector
//! and heading scorer then judge each span against that profile, and the
//! assembler turns accepted headings into the final outline.

mod assembler;
mod extractor;
mod heading;
mod options;
mod profiler;
mod title;

pub use assembler::assemble;
pub use extractor::{Extractor, LOG_TARGET};
pub use heading::{determine_level, HeadingScorer};
pub use options::ExtractOptions;
pub use profiler::Profiler;
pub use title::{title_from_filename, TitleSelection, TitleSelector, TitleSource};
