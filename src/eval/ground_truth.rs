//! Reference outline loading.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

const DEFAULT_LEVEL: &str = "H1";

/// One heading from a ground-truth or prediction file.
///
/// Levels are kept as strings so that reference files with levels outside
/// `H1`..`H6` still compare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledHeader {
    pub level: String,
    pub text: String,
    pub page: u32,
}

impl LabeledHeader {
    pub fn new(level: impl Into<String>, text: impl Into<String>, page: u32) -> Self {
        Self {
            level: level.into(),
            text: text.into(),
            page,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            level: obj
                .get("level")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_LEVEL)
                .to_string(),
            text: obj.get("text").and_then(Value::as_str).unwrap_or_default().to_string(),
            page: page_of(obj.get("page")),
        })
    }
}

fn page_of(value: Option<&Value>) -> u32 {
    value
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
        .map(|p| p.min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

/// Pull the header list out of any of the supported layouts:
/// `{"outline": [...]}`, `{"headers": [...]}`, a layout-parser page dump
/// whose `titles` elements become `H1` entries, or a bare array.
///
/// Non-object entries are skipped.
pub fn parse_headers(value: &Value) -> Vec<LabeledHeader> {
    if let Some(list) = value.get("outline") {
        collect(list)
    } else if let Some(list) = value.get("headers") {
        collect(list)
    } else if let Some(pages) = value.get("pages") {
        layout_titles(pages)
    } else {
        collect(value)
    }
}

fn collect(list: &Value) -> Vec<LabeledHeader> {
    list.as_array()
        .map(|items| items.iter().filter_map(LabeledHeader::from_value).collect())
        .unwrap_or_default()
}

fn layout_titles(pages: &Value) -> Vec<LabeledHeader> {
    let Some(pages) = pages.as_array() else {
        return Vec::new();
    };

    let mut headers = Vec::new();
    for page in pages {
        let number = page_of(page.get("page_number"));
        let titles = page
            .get("layout_data")
            .and_then(|l| l.get("elements"))
            .and_then(|e| e.get("titles"))
            .and_then(Value::as_array);
        for title in titles.into_iter().flatten() {
            let text = title.get("text").and_then(Value::as_str).unwrap_or_default();
            headers.push(LabeledHeader::new(DEFAULT_LEVEL, text, number));
        }
    }
    headers
}

/// Load and parse a header file.
pub fn load_headers<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledHeader>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let data = std::fs::read(path)?;
    let value: Value = serde_json::from_slice(&data)?;
    Ok(parse_headers(&value))
}
