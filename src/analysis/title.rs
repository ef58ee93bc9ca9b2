//! Title selection: metadata, then first-page content, then the file name.

use super::options::ExtractOptions;
use crate::model::{DocumentProfile, TextSpan, TitleCandidate};
use crate::text::{
    is_all_caps, is_page_number, is_short_number, is_title_case, strip_format_chars, Lexicon,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static WORD_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^microsoft\s+word\s*-\s*").unwrap());
static OFFICE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\.(docx?|pdf)$").unwrap());

/// Where the chosen title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleSource {
    Metadata,
    Content,
    Filename,
    Default,
}

/// A chosen title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSelection {
    pub title: String,
    pub source: TitleSource,
}

/// Ranks first-page spans as title candidates.
pub struct TitleSelector<'a> {
    lexicon: &'a Lexicon,
    options: &'a ExtractOptions,
}

impl<'a> TitleSelector<'a> {
    pub fn new(lexicon: &'a Lexicon, options: &'a ExtractOptions) -> Self {
        Self { lexicon, options }
    }

    /// Choose the document title. Never returns an empty title.
    pub fn select(
        &self,
        first_page: &[&TextSpan],
        profile: &DocumentProfile,
        metadata_title: Option<&str>,
        source_name: Option<&str>,
    ) -> TitleSelection {
        if let Some(title) = metadata_title.map(strip_format_chars) {
            let title = title.trim();
            let len = title.chars().count();
            if len >= self.options.metadata_title_min_len && len <= self.options.metadata_title_max_len {
                return TitleSelection {
                    title: title.to_string(),
                    source: TitleSource::Metadata,
                };
            }
        }

        let candidates = self.candidates(first_page, profile);
        // max_by_key keeps the last maximum, so scan in reverse to keep the earliest.
        if let Some(best) = candidates.iter().rev().max_by_key(|c| c.score) {
            return TitleSelection {
                title: best.text.clone(),
                source: TitleSource::Content,
            };
        }

        let title = source_name.map(title_from_filename).unwrap_or_default();
        if title.is_empty() {
            TitleSelection {
                title: "Document".to_string(),
                source: TitleSource::Default,
            }
        } else {
            TitleSelection {
                title,
                source: TitleSource::Filename,
            }
        }
    }

    /// Scored candidates from the top of page one, in reading order.
    pub fn candidates<'s>(
        &self,
        first_page: &[&'s TextSpan],
        profile: &DocumentProfile,
    ) -> Vec<TitleCandidate<'s>> {
        let mut spans: Vec<&TextSpan> = first_page
            .iter()
            .copied()
            .filter(|s| s.is_well_formed())
            .collect();
        spans.sort_by(|a, b| a.y().total_cmp(&b.y()));

        spans
            .into_iter()
            .take(self.options.title_scan_limit)
            .filter(|s| self.is_eligible(s))
            .map(|span| TitleCandidate {
                text: span.text.clone(),
                score: self.score(span, profile),
                span,
            })
            .filter(|c| c.score >= self.options.title_min_score)
            .collect()
    }

    fn is_eligible(&self, span: &TextSpan) -> bool {
        let text = span.normalized_text.as_str();
        let len = span.len();
        (2..=300).contains(&len)
            && !is_page_number(text)
            && !is_short_number(text)
            && !self.lexicon.is_page_marker(text)
    }

    fn score(&self, span: &TextSpan, profile: &DocumentProfile) -> i32 {
        let mut score = 0;

        let size_diff = span.font_size - profile.dominant_font_size;
        if size_diff > 2.0 {
            score += 4;
        } else if size_diff > 1.0 {
            score += 3;
        } else if size_diff > 0.0 {
            score += 2;
        }

        if span.bold {
            score += 3;
        }

        let y = span.y();
        if y < 300.0 {
            score += 2;
        } else if y < 500.0 {
            score += 1;
        }

        if (5..=150).contains(&span.len()) {
            score += 1;
        }

        let script = self.lexicon.script_of(span);
        if is_title_case(&span.text, script) || is_all_caps(&span.text, script, self.lexicon.scripts()) {
            score += 2;
        }

        if self.lexicon.has_header_keyword(&span.text) {
            score += 1;
        }

        score
    }
}

/// Turn a file name into a readable title ("Microsoft Word - annual_report.doc.pdf"
/// becomes "Annual Report").
pub fn title_from_filename(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = WORD_PREFIX.replace(&stem, "");
    let stem = OFFICE_SUFFIX.replace(&stem, "");
    let cleaned = stem
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if is_uniform_case(&cleaned) {
        to_title_case(&cleaned)
    } else {
        cleaned
    }
}

/// At least one cased letter, and all cased letters share a case.
fn is_uniform_case(text: &str) -> bool {
    let mut lower = false;
    let mut upper = false;
    for c in text.chars() {
        lower |= c.is_lowercase();
        upper |= c.is_uppercase();
    }
    lower != upper
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest.
fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
