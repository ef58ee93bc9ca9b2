//! The extraction call: wires profiling, title selection, heading scoring and
//! assembly together and enforces the failure contract at the boundary.

use super::assembler::assemble;
use super::heading::HeadingScorer;
use super::options::ExtractOptions;
use super::profiler::Profiler;
use super::title::TitleSelector;
use crate::error::Result;
use crate::model::{DocumentProfile, DocumentType, ExtractionResult, SourceDocument};
use crate::source::{self, SpanSource};
use crate::text::Lexicon;
use log::{Level, Log, Metadata, Record};
use rayon::prelude::*;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

/// Log target for every extraction record.
pub const LOG_TARGET: &str = "unoutline::extract";

/// Call-scoped logger: every record carries the document name as a `document`
/// key-value.
struct CallLog<'a> {
    sink: &'a dyn Log,
    global: bool,
    document: &'a str,
}

impl CallLog<'_> {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.global && level > log::max_level() {
            return;
        }
        let metadata = Metadata::builder().level(level).target(LOG_TARGET).build();
        if !self.sink.enabled(&metadata) {
            return;
        }
        let kv = ("document", self.document);
        self.sink.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .module_path_static(Some(module_path!()))
                .key_values(&kv)
                .build(),
        );
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }
}

/// Title and outline extractor.
///
/// Immutable after construction and safe to share across threads.
///
/// # Example
///
/// ```
/// use unoutline::{Extractor, PageSpans, SourceDocument, TextSpan};
///
/// let mut page = PageSpans::new(1);
/// page.push(TextSpan::at("1. Introduction", 1, 18.0, true, 72.0, 90.0));
/// page.push(TextSpan::at("Plain body text follows here.", 1, 10.0, false, 72.0, 120.0));
/// let mut doc = SourceDocument::new().with_name("guide.pdf");
/// doc.add_page(page);
///
/// let result = Extractor::new().extract(&doc);
/// assert_eq!(result.outline[0].text, "1. Introduction");
/// ```
#[derive(Clone)]
pub struct Extractor {
    lexicon: Arc<Lexicon>,
    options: ExtractOptions,
    logger: Option<Arc<dyn Log>>,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .field("keywords", &self.lexicon.keyword_count())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Extractor with the built-in lexicon and default options.
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::builtin(),
            options: ExtractOptions::default(),
            logger: None,
        }
    }

    /// Set extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a custom lexicon.
    pub fn with_lexicon(mut self, lexicon: Arc<Lexicon>) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Send log records to `logger` instead of the global logger.
    pub fn with_logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn call_log<'a>(&'a self, document: &'a str) -> CallLog<'a> {
        match self.logger.as_deref() {
            Some(sink) => CallLog {
                sink,
                global: false,
                document,
            },
            None => CallLog {
                sink: log::logger(),
                global: true,
                document,
            },
        }
    }

    /// Build the document profile.
    pub fn profile(&self, doc: &SourceDocument) -> DocumentProfile {
        Profiler::new(&self.lexicon).profile(doc.spans(), doc.page_count())
    }

    /// Run the full pipeline. Errors propagate to the caller.
    pub fn try_extract(&self, doc: &SourceDocument) -> Result<ExtractionResult> {
        let name = doc.name.as_deref().unwrap_or("<memory>");
        let call = self.call_log(name);

        let profile = self.profile(doc);
        call.debug(format_args!(
            "profile: type={} dominant_size={:.1} pages={} spans={} script={}",
            profile.document_type,
            profile.dominant_font_size,
            profile.page_count,
            doc.span_count(),
            profile.primary_script
        ));

        let first_page = doc.first_page_spans();
        let selection = TitleSelector::new(&self.lexicon, &self.options).select(
            &first_page,
            &profile,
            doc.metadata.title.as_deref(),
            doc.name.as_deref(),
        );
        call.debug(format_args!("title from {:?}: {:?}", selection.source, selection.title));

        if profile.document_type == DocumentType::Form {
            call.info(format_args!("form document, outline suppressed"));
            return Ok(ExtractionResult::new(selection.title, Vec::new()));
        }

        let candidates = HeadingScorer::new(&self.lexicon, &self.options).score_headings(doc.spans(), &profile);
        let accepted = candidates.len();
        let outline = assemble(candidates, self.options.max_outline_entries);
        call.debug(format_args!("headings: {} accepted, {} in outline", accepted, outline.len()));

        Ok(ExtractionResult::new(selection.title, outline))
    }

    /// Extract from an in-memory document. Never fails; see [`ExtractionResult::failure`].
    pub fn extract(&self, doc: &SourceDocument) -> ExtractionResult {
        let name = doc.name.as_deref().unwrap_or("<memory>");
        self.guard(name, || self.try_extract(doc))
    }

    /// Read a source and extract its outline. Never fails.
    pub fn extract_source(&self, source: &dyn SpanSource) -> ExtractionResult {
        self.guard(source.format_name(), || {
            let doc = source.read_document()?;
            self.try_extract(&doc)
        })
    }

    /// Sniff in-memory content and extract its outline. Never fails.
    pub fn extract_bytes(&self, data: &[u8], name: &str) -> ExtractionResult {
        self.guard(name, || {
            let doc = source::from_bytes(data, name)?.read_document()?;
            self.try_extract(&doc)
        })
    }

    /// Read a file and extract its outline, propagating errors.
    pub fn try_extract_path<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionResult> {
        let doc = source::read_path(path)?;
        self.try_extract(&doc)
    }

    /// Read a file and extract its outline. Never fails: a missing file yields
    /// the "File not found" payload and any other failure an "Error: ..." title.
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> ExtractionResult {
        let path = path.as_ref();
        let name = path.display().to_string();
        self.guard(&name, || self.try_extract_path(path))
    }

    /// Extract many files in parallel. Results keep the input order.
    pub fn extract_batch<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<ExtractionResult> {
        paths.par_iter().map(|p| self.extract_path(p)).collect()
    }

    fn guard<F>(&self, name: &str, f: F) -> ExtractionResult
    where
        F: FnOnce() -> Result<ExtractionResult>,
    {
        let call = self.call_log(name);
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(result)) => result,
            Ok(Err(e)) if e.is_not_found() => {
                call.warn(format_args!("{}", e));
                ExtractionResult::not_found()
            }
            Ok(Err(e)) => {
                call.error(format_args!("extraction failed: {}", e));
                ExtractionResult::failure(&e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                call.error(format_args!("extraction panicked: {}", message.unwrap_or("<no message>")));
                ExtractionResult::failure(message.unwrap_or(""))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
}
