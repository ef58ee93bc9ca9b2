//! Outline assembly: ordering, deduplication and the size cap.

use crate::model::{HeadingCandidate, OutlineEntry};
use crate::text::normalize;
use std::collections::HashSet;

/// Order candidates by (page, score desc), drop duplicate texts and cap the length.
///
/// Duplicates compare on normalized, lowercased text; the highest-scoring
/// occurrence on the earliest page is kept.
pub fn assemble(mut candidates: Vec<HeadingCandidate<'_>>, max_entries: usize) -> Vec<OutlineEntry> {
    candidates.sort_by(|a, b| a.page.cmp(&b.page).then_with(|| b.score.total_cmp(&a.score)));

    let mut seen = HashSet::new();
    let mut outline = Vec::new();
    for candidate in &candidates {
        if outline.len() >= max_entries {
            break;
        }
        let key = normalize(&candidate.text).to_lowercase();
        if key.chars().count() < 2 || !seen.insert(key) {
            continue;
        }
        outline.push(candidate.to_entry());
    }
    outline
}
