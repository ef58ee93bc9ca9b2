//! Heading scoring and level assignment.

use super::options::ExtractOptions;
use crate::model::{DocumentProfile, DocumentType, HeadingCandidate, HeadingLevel, TextSpan};
use crate::text::{extract_numbering, is_all_caps, is_short_number, is_title_case, Lexicon, Numbering};

/// Scores spans as heading candidates against a document profile.
pub struct HeadingScorer<'a> {
    lexicon: &'a Lexicon,
    options: &'a ExtractOptions,
}

impl<'a> HeadingScorer<'a> {
    pub fn new(lexicon: &'a Lexicon, options: &'a ExtractOptions) -> Self {
        Self { lexicon, options }
    }

    /// Score every span and keep those at or above the document-type threshold.
    ///
    /// Forms never have headings.
    pub fn score_headings<'s>(
        &self,
        spans: impl IntoIterator<Item = &'s TextSpan>,
        profile: &DocumentProfile,
    ) -> Vec<HeadingCandidate<'s>> {
        if profile.document_type == DocumentType::Form {
            return Vec::new();
        }

        let threshold = self.options.threshold_for(profile.document_type);

        spans
            .into_iter()
            .filter(|s| s.is_well_formed() && self.is_eligible(s))
            .filter_map(|span| {
                let numbering = extract_numbering(&span.normalized_text);
                let score = self.score(span, numbering.as_ref(), profile.dominant_font_size);
                (score >= threshold).then(|| HeadingCandidate {
                    text: span.text.clone(),
                    page: span.page,
                    level: determine_level(span, numbering.as_ref(), profile.dominant_font_size),
                    score,
                    span,
                })
            })
            .collect()
    }

    fn is_eligible(&self, span: &TextSpan) -> bool {
        let text = span.normalized_text.as_str();
        (2..=200).contains(&span.len())
            && !is_short_number(text)
            && !self.lexicon.is_page_marker(text)
    }

    /// Heading score of a single span, clamped to [0, 1].
    pub fn score(&self, span: &TextSpan, numbering: Option<&Numbering>, dominant: f32) -> f32 {
        let text = span.normalized_text.as_str();
        let len = span.len();
        let mut score = size_bonus(size_ratio(span.font_size, dominant));

        if span.bold {
            score += 0.4;
        }

        match numbering {
            Some(n) => score += numbering_bonus(n.dots()),
            None => {
                let script = self.lexicon.script_of(span);
                if self.lexicon.has_header_keyword(text) {
                    score += 0.3;
                }
                if is_title_case(&span.text, script) {
                    score += 0.3;
                }
                if (5..=50).contains(&len) && is_all_caps(&span.text, script, self.lexicon.scripts()) {
                    score += 0.4;
                }
                if text.ends_with([':', '：']) {
                    score += 0.3;
                }
            }
        }

        if len > 120 {
            score -= 0.2;
        }
        if text.matches([',', '，', '、']).count() > 2 {
            score -= 0.2;
        }
        if self.lexicon.is_blacklisted(text) {
            score -= 0.3;
        }

        score.clamp(0.0, 1.0)
    }
}

fn size_ratio(font_size: f32, dominant: f32) -> f32 {
    if dominant > 0.0 {
        font_size / dominant
    } else {
        1.0
    }
}

fn size_bonus(ratio: f32) -> f32 {
    if ratio >= 1.5 {
        0.5
    } else if ratio >= 1.3 {
        0.4
    } else if ratio >= 1.2 {
        0.3
    } else if ratio >= 1.1 {
        0.2
    } else {
        -0.1
    }
}

fn numbering_bonus(dots: usize) -> f32 {
    match dots {
        0 => 0.3,
        1 => 0.6,
        2 => 0.5,
        3 => 0.4,
        _ => 0.0,
    }
}

/// Level from numbering depth, else from relative size and weight.
pub fn determine_level(span: &TextSpan, numbering: Option<&Numbering>, dominant: f32) -> HeadingLevel {
    if let Some(n) = numbering {
        return match n.dots() {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        };
    }

    let ratio = size_ratio(span.font_size, dominant);
    if ratio >= 1.6 || (ratio >= 1.4 && span.bold) {
        HeadingLevel::H1
    } else if ratio >= 1.3 || (ratio >= 1.15 && span.bold) {
        HeadingLevel::H2
    } else if ratio >= 1.1 || span.bold {
        HeadingLevel::H3
    } else {
        HeadingLevel::H4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(dominant: f32, document_type: DocumentType) -> DocumentProfile {
        DocumentProfile {
            dominant_font_size: dominant,
            document_type,
            ..Default::default()
        }
    }

    fn score_one(span: &TextSpan) -> f32 {
        let lexicon = Lexicon::builtin();
        let options = ExtractOptions::default();
        let numbering = extract_numbering(&span.normalized_text);
        HeadingScorer::new(&lexicon, &options).score(span, numbering.as_ref(), 10.0)
    }

    fn headings(spans: &[TextSpan], profile: &DocumentProfile) -> Vec<(String, HeadingLevel, f32)> {
        let lexicon = Lexicon::builtin();
        let options = ExtractOptions::default();
        HeadingScorer::new(&lexicon, &options)
            .score_headings(spans, profile)
            .into_iter()
            .map(|c| (c.text, c.level, c.score))
            .collect()
    }

    #[test]
    fn test_numbered_headings() {
        let spans = vec![
            TextSpan::at("1. Introduction", 1, 18.0, true, 72.0, 100.0),
            TextSpan::at("1.1 Background", 1, 14.0, false, 72.0, 200.0),
        ];
        let found = headings(&spans, &profile(10.0, DocumentType::Document));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, "1. Introduction");
        assert_eq!(found[0].1, HeadingLevel::H1);
        assert!(found[0].2 >= 0.5);
        assert_eq!(found[1].1, HeadingLevel::H2);
    }

    #[test]
    fn test_score_components() {
        // 0.5 size + 0.4 bold + 0.6 numbering, clamped.
        assert_eq!(score_one(&TextSpan::at("1. Introduction", 1, 18.0, true, 0.0, 0.0)), 1.0);
        // 0.4 size + 0.5 two-level numbering.
        let s = score_one(&TextSpan::at("1.1 Background", 1, 14.0, false, 0.0, 0.0));
        assert!((s - 0.9).abs() < 1e-5);
        // Body text: -0.1 size, clamped to zero.
        assert_eq!(score_one(&TextSpan::at("the weather was good", 1, 10.0, false, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_keyword_bonus_is_language_independent() {
        let en = score_one(&TextSpan::at("Introduction", 1, 11.5, false, 0.0, 0.0));
        let ru = score_one(&TextSpan::at("Введение", 1, 11.5, false, 0.0, 0.0));
        assert!((en - ru).abs() < 1e-6);
        // 0.2 size + 0.3 keyword + 0.3 title case.
        assert!((en - 0.8).abs() < 1e-5);
    }

    #[test]
    fn test_all_caps_and_colon() {
        // -0.1 size + 0.4 bold + 0.3 title case + 0.4 all caps
        let s = score_one(&TextSpan::at("PROJECT GOALS", 1, 10.0, true, 0.0, 0.0));
        assert!((s - 1.0).abs() < 1e-5);
        // -0.1 size + 0.4 bold + 0.3 colon
        let s = score_one(&TextSpan::at("the following applies:", 1, 10.0, true, 0.0, 0.0));
        assert!((s - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_penalties() {
        let s = score_one(&TextSpan::at("Copyright Notice", 1, 15.0, true, 0.0, 0.0));
        // 0.5 size + 0.4 bold + 0.3 title case - 0.3 blacklist
        assert!((s - 0.9).abs() < 1e-5);

        let s = score_one(&TextSpan::at("Apples, Pears, Plums, Figs", 1, 15.0, false, 0.0, 0.0));
        // 0.5 size + 0.3 title case - 0.2 commas
        assert!((s - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_page_markers_and_digits_excluded() {
        let spans = vec![
            TextSpan::at("Page 3", 1, 24.0, true, 0.0, 0.0),
            TextSpan::at("3", 1, 24.0, true, 0.0, 0.0),
            TextSpan::at("A", 1, 24.0, true, 0.0, 0.0),
        ];
        assert!(headings(&spans, &profile(10.0, DocumentType::Document)).is_empty());
    }

    #[test]
    fn test_form_has_no_headings() {
        let spans = vec![TextSpan::at("1. Introduction", 1, 18.0, true, 0.0, 0.0)];
        assert!(headings(&spans, &profile(10.0, DocumentType::Form)).is_empty());
    }

    #[test]
    fn test_simple_document_threshold() {
        // 0.2 size + 0.3 keyword + 0.3 title case = 0.8 passes 0.7
        // 0.3 size + 0.3 title case = 0.6 fails 0.7
        let spans = vec![
            TextSpan::at("Summary", 1, 11.5, false, 0.0, 0.0),
            TextSpan::at("Coffee Menu", 1, 12.5, false, 0.0, 0.0),
        ];
        let simple = headings(&spans, &profile(10.0, DocumentType::SimpleDocument));
        assert_eq!(simple.len(), 1);
        assert_eq!(simple[0].0, "Summary");
        assert_eq!(headings(&spans, &profile(10.0, DocumentType::Document)).len(), 2);
    }

    #[test]
    fn test_determine_level_by_size() {
        let level = |size: f32, bold: bool| {
            determine_level(&TextSpan::at("Heading", 1, size, bold, 0.0, 0.0), None, 10.0)
        };
        assert_eq!(level(17.0, false), HeadingLevel::H1);
        assert_eq!(level(14.5, true), HeadingLevel::H1);
        assert_eq!(level(13.5, false), HeadingLevel::H2);
        assert_eq!(level(12.0, true), HeadingLevel::H2);
        assert_eq!(level(11.5, false), HeadingLevel::H3);
        assert_eq!(level(10.0, true), HeadingLevel::H3);
        assert_eq!(level(10.0, false), HeadingLevel::H4);
    }

    #[test]
    fn test_determine_level_by_numbering() {
        let level = |text: &str| {
            let span = TextSpan::at(text, 1, 10.0, false, 0.0, 0.0);
            let n = extract_numbering(&span.normalized_text);
            determine_level(&span, n.as_ref(), 10.0)
        };
        assert_eq!(level("(2) Scope"), HeadingLevel::H1);
        assert_eq!(level("2. Scope"), HeadingLevel::H1);
        assert_eq!(level("2.1 Scope"), HeadingLevel::H2);
        assert_eq!(level("2.1.4 Scope"), HeadingLevel::H3);
        assert_eq!(level("2.1.4.1 Scope"), HeadingLevel::H4);
        assert_eq!(level("2.1.4.1.9 Scope"), HeadingLevel::H4);
    }
}
