//! End-to-end extraction tests over span dumps and layout boxes.

use std::sync::Arc;
use unoutline::analysis::HeadingScorer;
use unoutline::{
    extract_bytes, extract_file, Error, ExtractOptions, ExtractionResult, Extractor, HeadingLevel,
    Lexicon, LexiconConfig, PageSpans, SourceDocument, SpanDump, SpanSource, TextSpan,
};

const BODY: &str = "The committee reviewed the proposal in detail and agreed on the next steps.";

fn body_lines(page: &mut PageSpans, count: usize, start_y: f32) {
    for i in 0..count {
        page.push(TextSpan::at(BODY, page.number, 10.0, false, 72.0, start_y + i as f32 * 14.0));
    }
}

fn report_document() -> SourceDocument {
    let mut first = PageSpans::new(1);
    first.push(TextSpan::at("Designing Reliable Systems", 1, 24.0, true, 72.0, 40.0));
    first.push(TextSpan::at("1. Introduction", 1, 18.0, true, 72.0, 90.0));
    body_lines(&mut first, 6, 120.0);
    first.push(TextSpan::at("1.1 Background", 1, 14.0, false, 72.0, 220.0));
    body_lines(&mut first, 4, 240.0);

    let mut second = PageSpans::new(2);
    second.push(TextSpan::at("2. Methods", 2, 18.0, true, 72.0, 60.0));
    body_lines(&mut second, 8, 90.0);
    second.push(TextSpan::at("Page 2", 2, 9.0, false, 300.0, 760.0));

    let mut doc = SourceDocument::new().with_name("reliable_systems.pdf");
    doc.add_page(first);
    doc.add_page(second);
    doc
}

fn level_of(result: &ExtractionResult, text: &str) -> Option<HeadingLevel> {
    result.outline.iter().find(|e| e.text == text).map(|e| e.level)
}

#[test]
fn test_numbered_outline() {
    let result = Extractor::new().extract(&report_document());

    assert_eq!(result.title, "Designing Reliable Systems");
    assert_eq!(level_of(&result, "1. Introduction"), Some(HeadingLevel::H1));
    assert_eq!(level_of(&result, "1.1 Background"), Some(HeadingLevel::H2));
    assert_eq!(level_of(&result, "2. Methods"), Some(HeadingLevel::H1));
    assert!(level_of(&result, BODY).is_none());

    let methods = result.outline.iter().find(|e| e.text == "2. Methods").unwrap();
    assert_eq!(methods.page, 2);
}

#[test]
fn test_outline_is_page_ordered() {
    let result = Extractor::new().extract(&report_document());
    let pages: Vec<u32> = result.outline.iter().map(|e| e.page).collect();
    let mut sorted = pages.clone();
    sorted.sort();
    assert_eq!(pages, sorted);
}

#[test]
fn test_form_yields_empty_outline() {
    let mut page = PageSpans::new(1);
    for (i, label) in ["Name:", "Date:", "Address:", "Phone:", "Signature:"].iter().enumerate() {
        page.push(TextSpan::at(*label, 1, 22.0, true, 72.0, 60.0 + i as f32 * 40.0));
    }
    page.push(TextSpan::at("1. Applicant Details", 1, 26.0, true, 72.0, 20.0));
    let mut doc = SourceDocument::new().with_name("application_form.pdf");
    doc.add_page(page);

    let extractor = Extractor::new();
    assert_eq!(extractor.profile(&doc).document_type, unoutline::DocumentType::Form);
    let result = extractor.extract(&doc);
    assert!(result.outline.is_empty());
    assert!(!result.title.is_empty());
}

fn sales_document(footnotes_first: bool) -> SourceDocument {
    let main: Vec<TextSpan> = ["Quarterly Sales Figures", BODY, BODY, BODY]
        .iter()
        .enumerate()
        .map(|(i, text)| TextSpan::at(*text, 1, 12.0, false, 72.0, 60.0 + i as f32 * 20.0))
        .collect();
    let notes: Vec<TextSpan> = (0..4)
        .map(|i| TextSpan::at("see the appendix for the full figures", 1, 10.0, false, 72.0, 700.0 + i as f32 * 12.0))
        .collect();

    let mut page = PageSpans::new(1);
    let (first, second) = if footnotes_first { (notes, main) } else { (main, notes) };
    for span in first.into_iter().chain(second) {
        page.push(span);
    }
    let mut doc = SourceDocument::new().with_name("sales.pdf");
    doc.add_page(page);
    doc
}

#[test]
fn test_dominant_size_tie_keeps_first_seen() {
    let extractor = Extractor::new();

    let doc = sales_document(false);
    let profile = extractor.profile(&doc);
    assert_eq!(profile.dominant_font_size, 12.0);
    assert_eq!(profile.document_type, unoutline::DocumentType::Document);
    let result = extractor.extract(&doc);
    assert!(result.outline.iter().all(|e| e.text != "Quarterly Sales Figures"));

    let doc = sales_document(true);
    assert_eq!(extractor.profile(&doc).dominant_font_size, 10.0);
    let result = extractor.extract(&doc);
    assert!(result.outline.iter().any(|e| e.text == "Quarterly Sales Figures"));
}

#[test]
fn test_outline_text_has_no_format_chars() {
    let mut page = PageSpans::new(1);
    page.push(TextSpan::at("Field Guide", 1, 24.0, true, 72.0, 30.0));
    page.push(TextSpan::at("1. Intro\u{200B}duction\u{FEFF}", 1, 18.0, true, 72.0, 80.0));
    body_lines(&mut page, 6, 110.0);
    let mut doc = SourceDocument::new();
    doc.add_page(page);

    let result = Extractor::new().extract(&doc);
    assert_eq!(level_of(&result, "1. Introduction"), Some(HeadingLevel::H1));
    assert!(result
        .outline
        .iter()
        .all(|e| !e.text.contains(['\u{200B}', '\u{FEFF}'])));
}

#[test]
fn test_page_markers_never_selected() {
    let mut page = PageSpans::new(1);
    page.push(TextSpan::at("Page 3", 1, 28.0, true, 72.0, 10.0));
    page.push(TextSpan::at("3", 1, 28.0, true, 72.0, 30.0));
    page.push(TextSpan::at("Network Design Guide", 1, 20.0, true, 72.0, 60.0));
    body_lines(&mut page, 6, 100.0);
    let mut doc = SourceDocument::new();
    doc.add_page(page);

    let result = Extractor::new().extract(&doc);
    assert_eq!(result.title, "Network Design Guide");
    assert!(result.outline.iter().all(|e| e.text != "Page 3" && e.text != "3"));
}

#[test]
fn test_metadata_title_wins() {
    let mut doc = report_document().with_title("Annual Report 2024");
    doc.pages[0].push(TextSpan::at("HUGE BANNER TEXT", 1, 48.0, true, 72.0, 5.0));
    let result = Extractor::new().extract(&doc);
    assert_eq!(result.title, "Annual Report 2024");
}

#[test]
fn test_filename_fallback() {
    let mut page = PageSpans::new(1);
    body_lines(&mut page, 3, 600.0);
    let mut doc = SourceDocument::new().with_name("Microsoft Word - quarterly_budget.pdf");
    doc.add_page(page);
    assert_eq!(Extractor::new().extract(&doc).title, "Quarterly Budget");
}

#[test]
fn test_keyword_bonus_matches_across_languages() {
    let lexicon = Lexicon::builtin();
    let options = ExtractOptions::default();
    let scorer = HeadingScorer::new(&lexicon, &options);

    let russian = TextSpan::at("Введение", 1, 12.0, false, 72.0, 100.0);
    let english = TextSpan::at("Introduction", 1, 12.0, false, 72.0, 100.0);
    let ru = scorer.score(&russian, None, 10.0);
    let en = scorer.score(&english, None, 10.0);

    assert!(lexicon.has_header_keyword(&russian.normalized_text));
    assert!((ru - en).abs() < 1e-6);
    assert!(ru >= 0.5);
}

#[test]
fn test_custom_lexicon_changes_scoring() {
    let mut page = PageSpans::new(1);
    page.push(TextSpan::at("Rapport", 1, 20.0, true, 72.0, 30.0));
    page.push(TextSpan::at("inledning", 1, 10.0, true, 72.0, 80.0));
    body_lines(&mut page, 8, 100.0);
    let mut doc = SourceDocument::new();
    doc.add_page(page);

    let builtin = Extractor::new().extract(&doc);
    assert!(builtin.outline.iter().all(|e| e.text != "inledning"));

    let config: LexiconConfig = serde_json::from_str(r#"{"keywords": {"swedish": ["inledning"]}}"#).unwrap();
    let lexicon = Arc::new(Lexicon::from_config(&config).unwrap());
    let custom = Extractor::new().with_lexicon(lexicon).extract(&doc);
    assert!(custom.outline.iter().any(|e| e.text == "inledning"));
}

#[test]
fn test_span_dump_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guide.json");
    std::fs::write(
        &path,
        format!(
            r#"{{
                "title": "",
                "pages": [{{"number": 1, "spans": [
                    {{"text": "Operator Guide", "font_size": 22, "bold": true, "x": 72, "y": 40}},
                    {{"text": "1. Overview", "font_size": 16, "bold": true, "x": 72, "y": 90}},
                    {{"text": "{BODY}", "font_size": 10, "x": 72, "y": 120}},
                    {{"text": "{BODY}", "font_size": 10, "x": 72, "y": 134}},
                    {{"text": "{BODY}", "font_size": 10, "x": 72, "y": 148}}
                ]}}]
            }}"#
        ),
    )
    .unwrap();

    let result = extract_file(&path);
    assert_eq!(result.title, "Operator Guide");
    assert_eq!(level_of(&result, "1. Overview"), Some(HeadingLevel::H1));
}

#[test]
fn test_layout_boxes_bytes() {
    let data = br#"{"boxes": [
        {"text": "Field Survey Results", "layout_type": "title", "page_number": 1, "top": 30},
        {"text": "Study Area", "layout_type": "section_header", "page_number": 1, "top": 90},
        {"text": "Observations were collected over three weeks at each site.", "layout_type": "text", "page_number": 1, "top": 120},
        {"text": "Samples were stored and shipped to the laboratory for testing.", "layout_type": "text", "page_number": 1, "top": 140},
        {"text": "Sampling Method", "layout_type": "section_header", "page_number": 2, "top": 40},
        {"text": "Each sample was weighed and labelled before it left the site.", "layout_type": "text", "page_number": 2, "top": 70}
    ]}"#;
    let result = extract_bytes(data, "survey.json");
    assert_eq!(result.title, "Field Survey Results");
    let study = result.outline.iter().find(|e| e.text == "Study Area").unwrap();
    assert_eq!(study.page, 1);
    assert_eq!(study.level, HeadingLevel::H2);
    assert!(result.outline.iter().any(|e| e.text == "Sampling Method" && e.page == 2));
}

#[test]
fn test_failure_payloads() {
    assert_eq!(extract_file("/no/such/dir/input.json"), ExtractionResult::not_found());

    let result = extract_bytes(br#"{"pages": [{"number": 0, "spans": []}]}"#, "zero.json");
    assert!(result.title.starts_with("Error: Invalid source"));
    assert!(result.outline.is_empty());
}

#[test]
fn test_try_extract_propagates() {
    let dump = SpanDump::from_json(r#"{"pages": [{"number": 0, "spans": []}]}"#).unwrap();
    assert!(matches!(dump.read_document(), Err(Error::InvalidSource(_))));
    let extractor = Extractor::new();
    assert!(extractor.try_extract_path("/no/such/input.json").unwrap_err().is_not_found());
}

#[test]
fn test_batch_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for (i, title) in ["Alpha Plan", "Beta Plan", "Gamma Plan"].iter().enumerate() {
        let path = dir.path().join(format!("doc{}.json", i));
        std::fs::write(
            &path,
            format!(r#"[{{"text": "{}", "layout_type": "title", "page_number": 1, "top": 20}}]"#, title),
        )
        .unwrap();
        paths.push(path);
    }
    paths.push(dir.path().join("missing.json"));

    let results = Extractor::new().extract_batch(&paths);
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha Plan", "Beta Plan", "Gamma Plan", "File not found"]);
}
