//! Document profiling: global statistics gathered before any span is scored.

use crate::model::{DocumentProfile, DocumentType, FontHistogram, TextSpan};
use crate::text::{extract_numbering, is_title_case, Lexicon, Script};
use std::collections::BTreeMap;

/// Raw counters accumulated in the forward pass.
#[derive(Debug, Default)]
struct Counters {
    total: usize,
    form_labels: usize,
    form_fields: usize,
    short_fragments: usize,
    numbered: usize,
}

impl Counters {
    fn ratio(&self, count: usize) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            count as f32 / self.total as f32
        }
    }
}

/// Builds a [`DocumentProfile`] from every well-formed span of a document.
pub struct Profiler<'l> {
    lexicon: &'l Lexicon,
}

impl<'l> Profiler<'l> {
    pub fn new(lexicon: &'l Lexicon) -> Self {
        Self { lexicon }
    }

    /// Profile all spans. `page_count` is the adapter's page count; the
    /// highest page number seen wins when it is larger.
    pub fn profile<'s>(
        &self,
        spans: impl IntoIterator<Item = &'s TextSpan>,
        page_count: u32,
    ) -> DocumentProfile {
        let mut histogram = FontHistogram::default();
        let mut script_counts: BTreeMap<Script, usize> = BTreeMap::new();
        let mut counters = Counters::default();
        let mut highest_page = page_count;

        for span in spans.into_iter().filter(|s| s.is_well_formed()) {
            histogram.add_size(span.font_size);
            let script = self.lexicon.script_of(span);
            *script_counts.entry(script).or_insert(0) += 1;
            highest_page = highest_page.max(span.page);
            count(span, script, &mut counters);
        }

        let document_type = classify(&counters);
        let dominant_font_size = histogram.mode().unwrap_or(10.0);

        DocumentProfile {
            page_count: highest_page,
            has_hierarchical_structure: has_size_gap(&histogram),
            font_size_histogram: histogram,
            dominant_font_size,
            document_type,
            has_numbered_sections: counters.numbered >= 3,
            primary_script: primary_script(&script_counts),
            script_counts,
        }
    }
}

fn count(span: &TextSpan, script: Script, counters: &mut Counters) {
    let text = span.normalized_text.as_str();
    let len = span.len();

    counters.total += 1;

    if len < 40 && text.contains([':', '：']) {
        counters.form_labels += 1;
    }

    let label_like = text.ends_with([':', '：', '-', '–']) || is_title_case(&span.text, script);
    if len < 50 && label_like {
        counters.form_fields += 1;
    }

    if text.split_whitespace().count() <= 2 {
        counters.short_fragments += 1;
    }

    if extract_numbering(text).is_some() {
        counters.numbered += 1;
    }
}

fn classify(counters: &Counters) -> DocumentType {
    if counters.total == 0 {
        return DocumentType::Unknown;
    }

    let form_ratio = counters.ratio(counters.form_labels);
    let field_ratio = counters.ratio(counters.form_fields);
    let table_ratio = counters.ratio(counters.short_fragments);

    if (form_ratio > 0.25 && field_ratio > 0.15) || form_ratio > 0.35 {
        DocumentType::Form
    } else if counters.total < 100 && table_ratio > 0.5 {
        DocumentType::SimpleDocument
    } else if counters.numbered > 8 {
        DocumentType::StructuredDocument
    } else if table_ratio > 0.6 {
        DocumentType::TableHeavy
    } else {
        DocumentType::Document
    }
}

fn has_size_gap(histogram: &FontHistogram) -> bool {
    histogram
        .sizes_descending()
        .windows(2)
        .any(|w| w[0] - w[1] >= 1.5)
}

fn primary_script(counts: &BTreeMap<Script, usize>) -> Script {
    let mut best = Script::Unknown;
    let mut best_count = 0;
    // BTreeMap iterates in script order, so a strict comparison keeps the first on ties.
    for (&script, &count) in counts {
        if script != Script::Unknown && count > best_count {
            best = script;
            best_count = count;
        }
    }
    best
}
