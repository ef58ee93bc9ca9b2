//! Property-based tests for normalization and outline invariants.

use proptest::prelude::*;
use std::collections::HashSet;
use unoutline::text::is_short_number;
use unoutline::{normalize, DocumentType, Extractor, Lexicon, PageSpans, SourceDocument, TextSpan};

/// Fragment texts: headings, body, labels, noise and numbered lines.
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{2,10}( [A-Z][a-z]{2,10}){0,3}",
        "[a-z]{2,8}( [a-z]{2,8}){3,12}",
        "[A-Z][a-z]{2,8}:",
        "[0-9]{1,2}(\\.[0-9]{1,2}){0,3} [A-Z][a-z]{3,10}",
        "Page [0-9]{1,3}",
        "[0-9]{1,2}",
        "[A-Z]{4,12}",
        Just("Introduction".to_string()),
        Just("Введение".to_string()),
        Just("第一章 概要".to_string()),
    ]
}

fn span_strategy() -> impl Strategy<Value = (String, f32, bool, u32, f32)> {
    (
        text_strategy(),
        prop_oneof![Just(9.0f32), Just(10.0), Just(12.0), Just(14.0), Just(18.0), Just(24.0)],
        any::<bool>(),
        1u32..5,
        0.0f32..800.0,
    )
}

fn build_document(spans: Vec<(String, f32, bool, u32, f32)>) -> SourceDocument {
    let mut pages: Vec<PageSpans> = (1..5).map(PageSpans::new).collect();
    for (text, size, bold, page, y) in spans {
        pages[(page - 1) as usize].push(TextSpan::at(text, page, size, bold, 72.0, y));
    }
    let mut doc = SourceDocument::new().with_name("generated.pdf");
    for page in pages {
        doc.add_page(page);
    }
    doc
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "\\PC{0,80}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_has_no_edge_or_double_whitespace(text in "[ \\ta-z\u{200B}\u{301}]{0,40}") {
        let out = normalize(&text);
        prop_assert!(!out.starts_with(' ') && !out.ends_with(' '));
        prop_assert!(!out.contains("  "));
        let has_zero_width = out.contains('\u{200B}');
        prop_assert!(!has_zero_width);
    }

    #[test]
    fn outline_invariants_hold(spans in prop::collection::vec(span_strategy(), 0..120)) {
        let doc = build_document(spans);
        let extractor = Extractor::new();
        let lexicon = Lexicon::builtin();
        let result = extractor.extract(&doc);

        prop_assert!(!result.title.is_empty());
        prop_assert!(result.outline.len() <= 40);

        let mut seen = HashSet::new();
        for entry in &result.outline {
            prop_assert!(seen.insert(normalize(&entry.text).to_lowercase()));
            prop_assert!(entry.page >= 1);
            prop_assert!(!lexicon.is_page_marker(&entry.text) && !is_short_number(&entry.text));
        }

        if extractor.profile(&doc).document_type == DocumentType::Form {
            prop_assert!(result.outline.is_empty());
        }
    }

    #[test]
    fn outline_respects_configured_cap(spans in prop::collection::vec(span_strategy(), 20..80), cap in 0usize..10) {
        let doc = build_document(spans);
        let options = unoutline::ExtractOptions::new().with_max_outline_entries(cap);
        let result = Extractor::new().with_options(options).extract(&doc);
        prop_assert!(result.outline.len() <= cap);
    }
}
