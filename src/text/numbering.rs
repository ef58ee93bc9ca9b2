//! Leading enumeration markers in any supported numbering system.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Numbering system of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingStyle {
    /// `1.1`, `1.2.3.`
    MultiLevel,
    /// `1.`
    Decimal,
    /// `1)` or `(1)`
    Parenthesized,
    /// `IV.` `iv)`
    Roman,
    /// `A.` `b)`
    Letter,
    /// `一、`
    CjkNumeral,
    /// `١.` `۱.`
    ArabicIndic,
    /// `१.`
    Devanagari,
}

/// A detected enumeration marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numbering {
    /// Marker text, trimmed. Multi-level markers always end with a dot.
    pub marker: String,
    /// Text following the marker, trimmed
    pub remainder: String,
    /// Which numbering system matched
    pub style: NumberingStyle,
}

impl Numbering {
    /// Number of dots in the marker; equals the level count for decimal markers.
    pub fn dots(&self) -> usize {
        self.marker.matches('.').count()
    }
}

static PATTERNS: Lazy<Vec<(NumberingStyle, Regex)>> = Lazy::new(|| {
    [
        (NumberingStyle::MultiLevel, r"^([0-9]+(?:\.[0-9]+)+\.?)\s*"),
        (NumberingStyle::Decimal, r"^([0-9]+\.)\s*"),
        (NumberingStyle::Parenthesized, r"^([0-9]+\)|\([0-9]+\))\s*"),
        (NumberingStyle::Roman, r"^([IVX]+[.)]|[ivx]+[.)])(?:\s+|$)"),
        (NumberingStyle::Letter, r"^([A-Z][.)]|[a-z][.)])(?:\s+|$)"),
        (NumberingStyle::CjkNumeral, r"^([一二三四五六七八九十]+[、.．])\s*"),
        (NumberingStyle::ArabicIndic, r"^([٠-٩۰-۹]+[.)])\s*"),
        (NumberingStyle::Devanagari, r"^([०-९]+[.)])\s*"),
    ]
    .into_iter()
    .map(|(style, pattern)| (style, Regex::new(pattern).unwrap()))
    .collect()
});

/// Detect a leading enumeration marker in normalized text.
///
/// Patterns are tried in priority order and the first match wins.
pub fn extract_numbering(text: &str) -> Option<Numbering> {
    let text = text.trim();
    for (style, re) in PATTERNS.iter() {
        let Some(caps) = re.captures(text) else {
            continue;
        };
        let whole = caps.get(0)?;
        let mut marker = caps.get(1)?.as_str().trim().to_string();
        if *style == NumberingStyle::MultiLevel && !marker.ends_with('.') {
            marker.push('.');
        }
        return Some(Numbering {
            marker,
            remainder: text[whole.end()..].trim().to_string(),
            style: *style,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_level() {
        let n = extract_numbering("1.1 Background").unwrap();
        assert_eq!(n.marker, "1.1.");
        assert_eq!(n.remainder, "Background");
        assert_eq!(n.dots(), 2);
        assert_eq!(n.style, NumberingStyle::MultiLevel);

        let n = extract_numbering("2.3.1. Data Sources").unwrap();
        assert_eq!(n.marker, "2.3.1.");
        assert_eq!(n.dots(), 3);
    }

    #[test]
    fn test_single_level() {
        let n = extract_numbering("1. Introduction").unwrap();
        assert_eq!(n.marker, "1.");
        assert_eq!(n.remainder, "Introduction");
        assert_eq!(n.dots(), 1);
        assert_eq!(n.style, NumberingStyle::Decimal);
    }

    #[test]
    fn test_parenthesized() {
        let n = extract_numbering("(3) Scope").unwrap();
        assert_eq!(n.marker, "(3)");
        assert_eq!(n.dots(), 0);
        let n = extract_numbering("4) Limits").unwrap();
        assert_eq!(n.style, NumberingStyle::Parenthesized);
    }

    #[test]
    fn test_roman_and_letters() {
        let n = extract_numbering("IV. Results").unwrap();
        assert_eq!(n.style, NumberingStyle::Roman);
        assert_eq!(n.remainder, "Results");
        let n = extract_numbering("b) Second item").unwrap();
        assert_eq!(n.style, NumberingStyle::Letter);
        assert_eq!(extract_numbering("A.").unwrap().remainder, "");
    }

    #[test]
    fn test_abbreviation_is_not_numbering() {
        assert!(extract_numbering("e.g. this example").is_none());
        assert!(extract_numbering("i.e.").is_none());
        assert!(extract_numbering("Introduction").is_none());
        assert!(extract_numbering("2024 Annual Report").is_none());
    }

    #[test]
    fn test_other_scripts() {
        let n = extract_numbering("一、概要").unwrap();
        assert_eq!(n.style, NumberingStyle::CjkNumeral);
        assert_eq!(n.remainder, "概要");
        assert_eq!(n.dots(), 0);

        let n = extract_numbering("١. مقدمة").unwrap();
        assert_eq!(n.style, NumberingStyle::ArabicIndic);
        assert_eq!(n.dots(), 1);

        let n = extract_numbering("۲. نتایج").unwrap();
        assert_eq!(n.style, NumberingStyle::ArabicIndic);

        let n = extract_numbering("१. परिचय").unwrap();
        assert_eq!(n.style, NumberingStyle::Devanagari);
    }
}
