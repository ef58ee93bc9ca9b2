//! Text canonicalization and script-aware case tests.

use super::script::{Script, ScriptTable};
use unicode_normalization::UnicodeNormalization;

/// Zero-width and format characters removed before comparison.
fn is_format_char(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200F}' | '\u{2060}' | '\u{FEFF}')
}

/// Remove zero-width and format characters, leaving everything else untouched.
pub fn strip_format_chars(text: &str) -> String {
    text.chars().filter(|c| !is_format_char(*c)).collect()
}

/// Canonicalize a fragment for comparison and scoring.
///
/// Removes zero-width characters, applies NFD, collapses whitespace runs
/// to a single space and trims.
pub fn normalize(text: &str) -> String {
    let decomposed: String = text.chars().filter(|c| !is_format_char(*c)).nfd().collect();

    let mut result = String::with_capacity(decomposed.len());
    for word in decomposed.split_whitespace() {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(word);
    }
    result
}

/// Length in characters.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Script-aware title-case test.
///
/// Cased scripts need 70% of words to start uppercase. Scripts without case
/// fall back to length rules.
pub fn is_title_case(text: &str, script: Script) -> bool {
    match script {
        Script::Latin | Script::Cyrillic => {
            let words: Vec<&str> = text.split_whitespace().collect();
            if words.is_empty() {
                return false;
            }
            let upper = words
                .iter()
                .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
                .count();
            upper as f32 >= words.len() as f32 * 0.7
        }
        Script::Chinese | Script::Japanese | Script::Korean => {
            (5..=80).contains(&char_len(text))
        }
        Script::Arabic | Script::Devanagari => {
            (5..=80).contains(&char_len(text)) && !text.ends_with('.')
        }
        _ => false,
    }
}

/// Script-aware all-caps test: 80% of the Latin/Cyrillic letters uppercase.
pub fn is_all_caps(text: &str, script: Script, table: &ScriptTable) -> bool {
    if !script.is_cased() {
        return false;
    }

    let mut letters = 0usize;
    let mut upper = 0usize;
    for c in text.chars().filter(|c| table.is_cased_letter(*c)) {
        letters += 1;
        if c.is_uppercase() {
            upper += 1;
        }
    }

    letters > 0 && upper as f32 >= letters as f32 * 0.8
}
