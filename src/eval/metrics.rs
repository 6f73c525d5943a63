//! Evaluation metrics: overlap precision and gold Precision@N.

use serde::Serialize;
use std::fmt;

use super::RankedAnswer;

/// Mean overlap score over a question's answers.
///
/// Undefined when there are no answers to average over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Precision {
    Defined(f64),
    Undefined,
}

impl Precision {
    pub fn value(self) -> Option<f64> {
        match self {
            Precision::Defined(v) => Some(v),
            Precision::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Precision::Defined(_))
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Defined(v) => write!(f, "{:.4}", v),
            Precision::Undefined => f.write_str("undefined"),
        }
    }
}

/// Sum of overlap scores divided by the number of answers.
///
/// Scores are raw overlap counts, so the result is not bounded by 1.
pub fn overlap_precision(total_score: u64, answers: usize) -> Precision {
    if answers == 0 {
        return Precision::Undefined;
    }
    Precision::Defined(total_score as f64 / answers as f64)
}

/// Precision at N against gold labels, where N is the number of relevant answers.
/// Returns (relevant answers in top-N) / N.
/// Returns None when no ranked answer carries a gold label or none is relevant.
pub fn gold_precision_at_n(ranked: &[RankedAnswer<'_>]) -> Option<f64> {
    if ranked.iter().all(|r| r.answer.gold.is_none()) {
        return None;
    }
    let n = ranked
        .iter()
        .filter(|r| r.answer.gold == Some(true))
        .count();
    if n == 0 {
        return None;
    }
    let hits = ranked
        .iter()
        .take(n)
        .filter(|r| r.answer.gold == Some(true))
        .count();
    Some(hits as f64 / n as f64)
}

/// Arithmetic mean, None for an empty input.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
