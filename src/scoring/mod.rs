//! Answer scoring: stream segmentation, lexical overlap scoring, and binding
//! of score records back to answer spans.

pub mod binder;
pub mod overlap;
pub mod segmenter;

pub use binder::{bind, BindSummary};
pub use overlap::{overlap_score, score_answers, OverlapMode};
pub use segmenter::{segment, AnswerGroup, Question, Segmentation};

use crate::annotation::AnswerSpan;

/// Sentinel tokens that structure a tagged-token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Starts the question region.
    pub question: String,
    /// Starts a new answer region.
    pub answer: String,
    /// Gold label for a relevant answer.
    pub positive: String,
    /// Gold label for an irrelevant answer.
    pub negative: String,
}

impl Markers {
    /// True for either gold label token
    pub fn is_label(&self, text: &str) -> bool {
        text == self.positive || text == self.negative
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            question: "Q".to_string(),
            answer: "A".to_string(),
            positive: "1".to_string(),
            negative: "0".to_string(),
        }
    }
}

/// Scoring state for one answer group, bound to its answer span later.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord<'a> {
    pub score: u32,
    pub confidence: f64,
    pub answer: Option<&'a AnswerSpan>,
    pub begin: Option<usize>,
    pub end: Option<usize>,
}

impl ScoreRecord<'_> {
    pub fn new() -> Self {
        Self {
            score: 0,
            confidence: 1.0,
            answer: None,
            begin: None,
            end: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.answer.is_some()
    }
}

impl Default for ScoreRecord<'_> {
    fn default() -> Self {
        Self::new()
    }
}
