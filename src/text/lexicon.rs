//! Data-driven keyword, script and noise tables used by the scorers.
//!
//! Everything language specific lives in [`LexiconConfig`]. Supporting a new
//! language means adding keywords (and, for a new writing system, a script
//! row); no scoring code changes.

use super::normalize::normalize;
use super::script::{Script, ScriptRange, ScriptTable};
use crate::error::{Error, Result};
use crate::model::TextSpan;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::Arc;

const ENGLISH: &[&str] = &[
    "introduction", "background", "summary", "conclusion", "references",
    "acknowledgement", "acknowledgment", "overview", "abstract", "preface",
    "contents", "chapter", "section", "appendix", "bibliography", "index",
    "methodology", "results", "discussion", "findings", "analysis",
];

const SPANISH: &[&str] = &[
    "introducción", "antecedentes", "resumen", "conclusión", "referencias",
    "agradecimientos", "abstracto", "prefacio", "contenidos", "capítulo",
    "sección", "apéndice", "bibliografía", "índice", "metodología",
    "resultados", "discusión", "hallazgos", "análisis",
];

const FRENCH: &[&str] = &[
    "introduction", "contexte", "résumé", "conclusion", "références",
    "remerciements", "aperçu", "préface", "sommaire", "chapitre", "section",
    "annexe", "bibliographie", "index", "méthodologie", "résultats",
    "discussion", "conclusions", "analyse",
];

const GERMAN: &[&str] = &[
    "einführung", "hintergrund", "zusammenfassung", "schlussfolgerung",
    "referenzen", "danksagungen", "überblick", "abstrakt", "vorwort", "inhalt",
    "kapitel", "abschnitt", "anhang", "bibliographie", "index", "methodik",
    "ergebnisse", "diskussion", "erkenntnisse", "analyse",
];

const ITALIAN: &[&str] = &[
    "introduzione", "background", "riassunto", "conclusione", "riferimenti",
    "ringraziamenti", "panoramica", "estratto", "prefazione", "contenuti",
    "capitolo", "sezione", "appendice", "bibliografia", "indice",
    "metodologia", "risultati", "discussione", "analisi",
];

const PORTUGUESE: &[&str] = &[
    "introdução", "antecedentes", "resumo", "conclusão", "referências",
    "agradecimentos", "visão geral", "prefácio", "conteúdo", "capítulo",
    "seção", "apêndice", "bibliografia", "índice", "metodologia",
    "resultados", "discussão", "descobertas", "análise",
];

const DUTCH: &[&str] = &[
    "inleiding", "achtergrond", "samenvatting", "conclusie", "referenties",
    "dankwoord", "overzicht", "abstract", "voorwoord", "inhoud", "hoofdstuk",
    "sectie", "bijlage", "bibliografie", "index", "methodologie",
    "resultaten", "discussie", "bevindingen", "analyse",
];

const RUSSIAN: &[&str] = &[
    "введение", "предпосылки", "резюме", "заключение", "ссылки",
    "благодарности", "обзор", "аннотация", "предисловие", "содержание",
    "глава", "раздел", "приложение", "библиография", "индекс", "методология",
    "результаты", "обсуждение", "выводы", "анализ",
];

const CHINESE: &[&str] = &[
    "介绍", "背景", "摘要", "结论", "参考文献", "致谢", "概述", "前言", "目录",
    "章节", "部分", "附录", "参考书目", "索引", "方法论", "结果", "讨论", "发现",
    "分析", "引言", "总结", "概要", "序言",
];

const JAPANESE: &[&str] = &[
    "紹介", "背景", "要約", "結論", "参考文献", "謝辞", "概要", "抄録", "序文",
    "目次", "章", "セクション", "付録", "書誌", "索引", "方法論", "結果", "議論",
    "発見", "分析", "はじめに", "まとめ", "概観", "序章",
];

const KOREAN: &[&str] = &[
    "소개", "배경", "요약", "결론", "참조", "감사의 말", "개요", "초록", "서문",
    "목차", "장", "섹션", "부록", "참고문헌", "색인", "방법론", "결과", "토론",
    "발견", "분석", "서론", "정리", "개관", "머리말",
];

const ARABIC: &[&str] = &[
    "مقدمة", "خلفية", "ملخص", "خاتمة", "مراجع", "شكر وتقدير", "نظرة عامة",
    "مستخلص", "تمهيد", "محتويات", "فصل", "قسم", "ملحق", "ببليوغرافيا", "فهرس",
    "منهجية", "نتائج", "مناقشة", "استنتاجات", "تحليل",
];

const HINDI: &[&str] = &[
    "परिचय", "पृष्ठभूमि", "सारांश", "निष्कर्ष", "संदर्भ", "आभार", "अवलोकन", "सार",
    "प्रस्तावना", "विषय-सूची", "अध्याय", "खंड", "परिशिष्ट", "ग्रंथ-सूची", "सूचकांक",
    "कार्यप्रणाली", "परिणाम", "चर्चा", "विश्लेषण",
];

const BLACKLIST_WORDS: &[&str] = &[
    "page", "copyright", "version", "página", "pagina", "versión", "versão",
    "versione", "versie", "seite", "urheberrecht", "страница", "версия",
    "derechos reservados", "all rights reserved",
];

const BLACKLIST_MARKS: &[&str] = &["©", "版权", "著作権", "저작권"];

const PAGE_WORDS: &[&str] = &[
    "page", "p.", "pg.", "página", "pagina", "pag.", "seite", "blz.",
    "страница", "стр.", "صفحة", "पृष्ठ",
];

const PAGE_SUFFIXES: &[&str] = &["页", "頁", "ページ", "페이지", "쪽"];

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Serializable lexicon tables.
///
/// Missing fields fall back to the built-in values, so a config file may
/// override only the keyword sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Header keywords per language
    pub keywords: BTreeMap<String, Vec<String>>,
    /// Script range table, in detection order
    pub scripts: Vec<ScriptRange>,
    /// Noise words matched on word boundaries
    pub blacklist_words: Vec<String>,
    /// Noise marks matched anywhere
    pub blacklist_marks: Vec<String>,
    /// Words introducing a page number ("page 3")
    pub page_words: Vec<String>,
    /// Words following a page number ("3 페이지")
    pub page_suffixes: Vec<String>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        let keywords = [
            ("english", ENGLISH),
            ("spanish", SPANISH),
            ("french", FRENCH),
            ("german", GERMAN),
            ("italian", ITALIAN),
            ("portuguese", PORTUGUESE),
            ("dutch", DUTCH),
            ("russian", RUSSIAN),
            ("chinese", CHINESE),
            ("japanese", JAPANESE),
            ("korean", KOREAN),
            ("arabic", ARABIC),
            ("hindi", HINDI),
        ]
        .into_iter()
        .map(|(lang, list)| (lang.to_string(), words(list)))
        .collect();

        Self {
            keywords,
            scripts: ScriptTable::builtin_rows(),
            blacklist_words: words(BLACKLIST_WORDS),
            blacklist_marks: words(BLACKLIST_MARKS),
            page_words: words(PAGE_WORDS),
            page_suffixes: words(PAGE_SUFFIXES),
        }
    }
}

/// Compiled lexicon.
#[derive(Debug)]
pub struct Lexicon {
    /// (language, normalized lowercase keyword)
    keywords: Vec<(String, String)>,
    scripts: ScriptTable,
    /// Whether `scripts` differs from the table spans are built with
    custom_scripts: bool,
    blacklist: Regex,
    page_marker: Regex,
}

static BUILTIN: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(Lexicon::from_config(&LexiconConfig::default()).expect("built-in lexicon compiles"))
});

static PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s]*[-–—]?\s*\d+\s*[-–—]?\s*$").unwrap());

/// Text that is nothing but a page number, optionally dash-decorated (`- 3 -`).
pub fn is_page_number(text: &str) -> bool {
    PAGE_NUMBER.is_match(text)
}

/// A bare digit string shorter than three characters.
pub fn is_short_number(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.chars().count() < 3 && text.chars().all(char::is_numeric)
}

fn canonical(word: &str) -> String {
    normalize(word).to_lowercase()
}

fn alternation(list: &[String]) -> Option<String> {
    let parts: Vec<String> = list
        .iter()
        .map(|w| canonical(w))
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(&w))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("|"))
    }
}

impl Lexicon {
    /// Shared built-in lexicon.
    pub fn builtin() -> Arc<Lexicon> {
        Arc::clone(&BUILTIN)
    }

    /// Compile a lexicon from its tables.
    pub fn from_config(config: &LexiconConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();
        for (lang, list) in &config.keywords {
            for word in list {
                let key = canonical(word);
                if key.is_empty() {
                    return Err(Error::Lexicon(format!("empty keyword for language '{}'", lang)));
                }
                if seen.insert(key.clone()) {
                    keywords.push((lang.clone(), key));
                }
            }
        }

        let scripts = ScriptTable::from_rows(config.scripts.clone())?;
        let custom_scripts = config.scripts != ScriptTable::builtin_rows();

        let mut noise = Vec::new();
        if let Some(words) = alternation(&config.blacklist_words) {
            noise.push(format!(r"\b(?:{}|\d{{4}})\b", words));
        } else {
            noise.push(r"\b\d{4}\b".to_string());
        }
        if let Some(marks) = alternation(&config.blacklist_marks) {
            noise.push(format!("(?:{})", marks));
        }
        let blacklist = Regex::new(&format!("(?i){}", noise.join("|")))?;

        let mut markers = vec![r"[0-9]+\s*/\s*[0-9]+\s*$".to_string()];
        if let Some(words) = alternation(&config.page_words) {
            markers.push(format!(r"(?:{})\s*[0-9]+", words));
        }
        if let Some(suffixes) = alternation(&config.page_suffixes) {
            markers.push(format!(r"第?\s*[0-9]+\s*(?:{})\s*$", suffixes));
        }
        let page_marker = Regex::new(&format!("(?i)^(?:{})", markers.join("|")))?;

        Ok(Self {
            keywords,
            scripts,
            custom_scripts,
            blacklist,
            page_marker,
        })
    }

    /// Load and compile a lexicon from a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: LexiconConfig = serde_json::from_str(&content)?;
        Self::from_config(&config)
    }

    /// Script table.
    pub fn scripts(&self) -> &ScriptTable {
        &self.scripts
    }

    /// Detect the script of `text` with this lexicon's table.
    pub fn detect_script(&self, text: &str) -> Script {
        self.scripts.detect(text)
    }

    /// Script of a span under this lexicon's table.
    ///
    /// Spans carry a script detected with the built-in table; a custom table
    /// re-detects from the span text.
    pub fn script_of(&self, span: &TextSpan) -> Script {
        if self.custom_scripts {
            self.scripts.detect(&span.text)
        } else {
            span.script
        }
    }

    /// Whether the text contains a header keyword of any language.
    pub fn has_header_keyword(&self, text: &str) -> bool {
        self.keyword_language(text).is_some()
    }

    /// Language of the first header keyword contained in the text.
    pub fn keyword_language(&self, text: &str) -> Option<&str> {
        let text = canonical(text);
        self.keywords
            .iter()
            .find(|(_, kw)| text.contains(kw.as_str()))
            .map(|(lang, _)| lang.as_str())
    }

    /// Whether the text contains page, copyright, version or year noise.
    pub fn is_blacklisted(&self, text: &str) -> bool {
        self.blacklist.is_match(&canonical(text))
    }

    /// Whether the text starts as a localized page marker ("Page 3", "3 / 10").
    pub fn is_page_marker(&self, text: &str) -> bool {
        self.page_marker.is_match(&canonical(text))
    }

    /// Number of distinct keywords.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}
