//! Outline evaluation against a reference outline.
//!
//! Headers are matched greedily: every reference header takes its best
//! scoring prediction, and a prediction can satisfy several references.

mod ground_truth;
mod metrics;

pub use ground_truth::{load_headers, parse_headers, LabeledHeader};
pub use metrics::{
    text_similarity, EvaluationReport, Evaluator, MatchDetail, Metrics, DEFAULT_SIMILARITY_THRESHOLD,
};
