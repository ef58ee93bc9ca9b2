//! Precision / recall scoring of a predicted outline against a reference.

use super::ground_truth::{load_headers, LabeledHeader};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use similar::TextDiff;
use std::collections::BTreeSet;
use std::path::Path;

/// Default minimum match score.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.8;
const LEVEL_BONUS: f32 = 0.1;
const PAGE_BONUS: f32 = 0.05;

/// Confusion counts and derived scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub accuracy: f64,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl Metrics {
    fn from_counts(tp: usize, fp: usize, fn_: usize) -> Self {
        let ratio = |num: usize, den: usize| if den > 0 { num as f64 / den as f64 } else { 0.0 };
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self {
            precision,
            recall,
            f1_score,
            accuracy: ratio(tp, tp + fp + fn_),
            true_positives: tp,
            false_positives: fp,
            false_negatives: fn_,
        }
    }
}

/// Best prediction for one reference header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub ground_truth: LabeledHeader,
    pub best_match: Option<LabeledHeader>,
    pub similarity: f32,
    pub is_match: bool,
}

/// Full evaluation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metrics: Metrics,
    pub ground_truth_count: usize,
    pub predicted_count: usize,
    pub similarity_threshold: f32,
    pub detailed_matches: Vec<MatchDetail>,
    pub unmatched_predictions: Vec<LabeledHeader>,
}

/// Lowercase, trim and flatten line breaks and tabs.
fn comparable(text: &str) -> String {
    text.to_lowercase().trim().replace(['\n', '\t'], " ")
}

/// Character-level similarity of two header texts in `[0, 1]`.
pub fn text_similarity(a: &str, b: &str) -> f32 {
    let a = comparable(a);
    let b = comparable(b);
    TextDiff::from_chars(a.as_str(), b.as_str()).ratio()
}

/// Compares predicted headers with reference headers.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    threshold: f32,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl Evaluator {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Score of `candidate` as a match for `target`: text similarity plus
    /// small bonuses for an equal level and an equal page.
    pub fn match_score(&self, target: &LabeledHeader, candidate: &LabeledHeader) -> f32 {
        let mut score = text_similarity(&target.text, &candidate.text);
        if target.level == candidate.level {
            score += LEVEL_BONUS;
        }
        if target.page == candidate.page {
            score += PAGE_BONUS;
        }
        score
    }

    /// Index and score of the best candidate; the first one wins ties.
    /// A candidate scoring 0 is never a match.
    pub fn best_match(&self, target: &LabeledHeader, candidates: &[LabeledHeader]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            let score = self.match_score(target, candidate);
            if score > best.map_or(0.0, |(_, s)| s) {
                best = Some((i, score));
            }
        }
        best
    }

    /// Compare two header lists.
    pub fn evaluate(&self, ground_truth: &[LabeledHeader], predictions: &[LabeledHeader]) -> EvaluationReport {
        let mut matched: BTreeSet<usize> = BTreeSet::new();
        let mut details = Vec::with_capacity(ground_truth.len());
        let mut tp = 0;

        for gt in ground_truth {
            let best = self.best_match(gt, predictions);
            let similarity = best.map_or(0.0, |(_, s)| s);
            let is_match = best.is_some() && similarity >= self.threshold;
            if let (true, Some((index, _))) = (is_match, best) {
                tp += 1;
                matched.insert(index);
            }
            details.push(MatchDetail {
                ground_truth: gt.clone(),
                best_match: best.map(|(i, _)| predictions[i].clone()),
                similarity,
                is_match,
            });
        }

        let fn_ = ground_truth.len() - tp;
        let fp = predictions.len() - matched.len();
        let unmatched_predictions = predictions
            .iter()
            .enumerate()
            .filter(|(i, _)| !matched.contains(i))
            .map(|(_, p)| p.clone())
            .collect();

        EvaluationReport {
            metrics: Metrics::from_counts(tp, fp, fn_),
            ground_truth_count: ground_truth.len(),
            predicted_count: predictions.len(),
            similarity_threshold: self.threshold,
            detailed_matches: details,
            unmatched_predictions,
        }
    }

    /// Load both files and compare them.
    pub fn evaluate_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        ground_truth: P,
        predictions: Q,
    ) -> Result<EvaluationReport> {
        let gt = load_headers(ground_truth)?;
        let predicted = load_headers(predictions)?;
        Ok(self.evaluate(&gt, &predicted))
    }
}
