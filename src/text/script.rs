//! Writing-system detection over Unicode code point ranges.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Writing system of a text fragment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Latin,
    Cyrillic,
    Arabic,
    Chinese,
    Japanese,
    JapaneseHiragana,
    JapaneseKatakana,
    JapaneseKanji,
    Korean,
    Devanagari,
    Thai,
    Hebrew,
    #[default]
    Unknown,
}

impl Script {
    /// Scripts whose letters carry case.
    pub fn is_cased(self) -> bool {
        matches!(self, Script::Latin | Script::Cyrillic)
    }

    /// Chinese, Japanese or Korean.
    pub fn is_cjk(self) -> bool {
        matches!(self, Script::Chinese | Script::Japanese | Script::Korean)
    }

    /// Lowercase identifier used in serialized profiles.
    pub fn as_str(self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Cyrillic => "cyrillic",
            Script::Arabic => "arabic",
            Script::Chinese => "chinese",
            Script::Japanese => "japanese",
            Script::JapaneseHiragana => "japanese_hiragana",
            Script::JapaneseKatakana => "japanese_katakana",
            Script::JapaneseKanji => "japanese_kanji",
            Script::Korean => "korean",
            Script::Devanagari => "devanagari",
            Script::Thai => "thai",
            Script::Hebrew => "hebrew",
            Script::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the script table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRange {
    /// Script counted by this row
    pub script: Script,
    /// Inclusive code point ranges
    pub ranges: Vec<[u32; 2]>,
    /// Whether the script may be returned by detection.
    /// Rows that only feed other rules (kanji) are counted but never elected.
    #[serde(default = "default_elect")]
    pub elect: bool,
}

fn default_elect() -> bool {
    true
}

impl ScriptRange {
    fn new(script: Script, ranges: &[[u32; 2]]) -> Self {
        Self {
            script,
            ranges: ranges.to_vec(),
            elect: true,
        }
    }

    fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        self.ranges.iter().any(|[lo, hi]| cp >= *lo && cp <= *hi)
    }
}

/// Ordered table of script ranges.
#[derive(Debug, Clone)]
pub struct ScriptTable {
    rows: Vec<ScriptRange>,
}

static BUILTIN: Lazy<ScriptTable> = Lazy::new(ScriptTable::builtin);

/// Detect the script of `text` using the built-in table.
pub fn detect_script(text: &str) -> Script {
    BUILTIN.detect(text)
}

impl ScriptTable {
    /// Built-in table covering the supported writing systems.
    pub fn builtin() -> Self {
        Self {
            rows: Self::builtin_rows(),
        }
    }

    /// Rows of the built-in table, in detection order.
    pub fn builtin_rows() -> Vec<ScriptRange> {
        vec![
            ScriptRange::new(Script::Latin, &[[0x41, 0x5A], [0x61, 0x7A], [0xC0, 0xFF]]),
            ScriptRange::new(
                Script::Cyrillic,
                &[[0x410, 0x44F], [0x401, 0x401], [0x451, 0x451]],
            ),
            ScriptRange::new(Script::Arabic, &[[0x600, 0x6FF]]),
            ScriptRange::new(Script::Chinese, &[[0x4E00, 0x9FFF]]),
            ScriptRange::new(Script::JapaneseHiragana, &[[0x3040, 0x309F]]),
            ScriptRange::new(Script::JapaneseKatakana, &[[0x30A0, 0x30FF]]),
            ScriptRange {
                script: Script::JapaneseKanji,
                ranges: vec![[0x4E00, 0x9FAF]],
                elect: false,
            },
            ScriptRange::new(Script::Korean, &[[0xAC00, 0xD7AF]]),
            ScriptRange::new(Script::Devanagari, &[[0x900, 0x97F]]),
            ScriptRange::new(Script::Thai, &[[0xE00, 0xE7F]]),
            ScriptRange::new(Script::Hebrew, &[[0x590, 0x5FF]]),
        ]
    }

    /// Build a table from configured rows.
    pub fn from_rows(rows: Vec<ScriptRange>) -> Result<Self> {
        for row in &rows {
            if row.script == Script::Unknown {
                return Err(Error::Lexicon(
                    "script table cannot contain 'unknown'".to_string(),
                ));
            }
            if let Some([lo, hi]) = row.ranges.iter().find(|[lo, hi]| lo > hi) {
                return Err(Error::Lexicon(format!(
                    "empty range {:#x}..{:#x} for script '{}'",
                    lo, hi, row.script
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Character counts per table row, in table order.
    pub fn counts(&self, text: &str) -> Vec<(Script, usize)> {
        let mut counts: Vec<(Script, usize)> = self.rows.iter().map(|r| (r.script, 0)).collect();
        for c in text.chars() {
            for (row, count) in self.rows.iter().zip(counts.iter_mut()) {
                if row.contains(c) {
                    count.1 += 1;
                }
            }
        }
        counts
    }

    /// Detect the dominant script of `text`.
    ///
    /// Any hiragana or katakana makes the text Japanese. Otherwise the elected
    /// script with the highest count wins; a tie or no match yields `Unknown`.
    pub fn detect(&self, text: &str) -> Script {
        let counts = self.counts(text);

        let kana = counts.iter().any(|(script, n)| {
            *n > 0 && matches!(script, Script::JapaneseHiragana | Script::JapaneseKatakana)
        });
        if kana {
            return Script::Japanese;
        }

        let mut best = Script::Unknown;
        let mut best_count = 0usize;
        let mut tied = false;
        for (row, (script, n)) in self.rows.iter().zip(counts) {
            if !row.elect || n == 0 {
                continue;
            }
            if n > best_count {
                best = script;
                best_count = n;
                tied = false;
            } else if n == best_count && script != best {
                tied = true;
            }
        }

        if tied {
            Script::Unknown
        } else {
            best
        }
    }

    /// Whether `c` falls in a cased script (Latin or Cyrillic) row.
    pub fn is_cased_letter(&self, c: char) -> bool {
        self.rows
            .iter()
            .any(|row| row.script.is_cased() && row.contains(c))
    }
}

impl Default for ScriptTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_latin() {
        assert_eq!(detect_script("Introduction"), Script::Latin);
        assert_eq!(detect_script("Résumé des travaux"), Script::Latin);
    }

    #[test]
    fn test_detect_cyrillic() {
        assert_eq!(detect_script("Введение"), Script::Cyrillic);
        assert_eq!(detect_script("Ёлка"), Script::Cyrillic);
    }

    #[test]
    fn test_detect_japanese_kana_wins() {
        // Kanji dominate but a single kana makes it Japanese.
        assert_eq!(detect_script("研究開発の概要"), Script::Japanese);
        assert_eq!(detect_script("セクション"), Script::Japanese);
    }

    #[test]
    fn test_kanji_only_is_chinese() {
        assert_eq!(detect_script("参考文献"), Script::Chinese);
    }

    #[test]
    fn test_detect_other_scripts() {
        assert_eq!(detect_script("서론"), Script::Korean);
        assert_eq!(detect_script("مقدمة"), Script::Arabic);
        assert_eq!(detect_script("परिचय"), Script::Devanagari);
        assert_eq!(detect_script("บทนำ"), Script::Thai);
        assert_eq!(detect_script("מבוא"), Script::Hebrew);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_script(""), Script::Unknown);
        assert_eq!(detect_script("12345 !?"), Script::Unknown);
    }

    #[test]
    fn test_tie_is_unknown() {
        assert_eq!(detect_script("ab 서론"), Script::Unknown);
    }

    #[test]
    fn test_from_rows_rejects_bad_range() {
        let rows = vec![ScriptRange {
            script: Script::Latin,
            ranges: vec![[0x7A, 0x61]],
            elect: true,
        }];
        assert!(ScriptTable::from_rows(rows).is_err());
    }

    #[test]
    fn test_script_serde_names() {
        let json = serde_json::to_string(&Script::JapaneseKanji).unwrap();
        assert_eq!(json, "\"japanese_kanji\"");
        let script: Script = serde_json::from_str("\"cyrillic\"").unwrap();
        assert_eq!(script, Script::Cyrillic);
    }
}
