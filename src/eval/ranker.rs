//! Ranks bound answers by score and computes the evaluation for one question.

use serde::Serialize;

use super::metrics::{overlap_precision, Precision};
use crate::annotation::AnswerSpan;
use crate::scoring::ScoreRecord;

/// A bound answer with its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedAnswer<'a> {
    pub answer: &'a AnswerSpan,
    pub score: u32,
    /// Position of the answer group in the token stream.
    pub index: usize,
}

/// Evaluation of one question's answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation<'a> {
    /// Begin offset of the first answer in stream order.
    pub begin: usize,
    /// End offset of the last answer in stream order.
    pub end: usize,
    pub precision: Precision,
    /// Answers by score, highest first; ties keep stream order.
    pub ranked: Vec<RankedAnswer<'a>>,
}

/// Rank bound records and compute precision over them.
///
/// Unbound records have no answer identity and are left out of both the
/// ranking and the precision. With no bound records the precision is
/// [`Precision::Undefined`] and the covering span is `(0, 0)`.
pub fn evaluate<'a>(records: &[ScoreRecord<'a>]) -> Evaluation<'a> {
    let mut ranked: Vec<RankedAnswer<'a>> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record.answer.map(|answer| RankedAnswer {
                answer,
                score: record.score,
                index,
            })
        })
        .collect();

    let excluded = records.len() - ranked.len();
    if excluded > 0 {
        log::debug!("Excluding {} unbound score record(s) from evaluation", excluded);
    }

    let begin = ranked.first().map_or(0, |r| r.answer.begin);
    let end = ranked.last().map_or(0, |r| r.answer.end);

    let total: u64 = ranked.iter().map(|r| u64::from(r.score)).sum();
    let precision = overlap_precision(total, ranked.len());

    // Stable: equal scores keep stream order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    Evaluation {
        begin,
        end,
        precision,
        ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(n: usize) -> Vec<AnswerSpan> {
        (0..n)
            .map(|i| AnswerSpan {
                begin: i * 10,
                end: i * 10 + 5,
                tokens: vec![format!("answer{}", i)],
                gold: None,
            })
            .collect()
    }

    fn bound_records<'a>(spans: &'a [AnswerSpan], scores: &[u32]) -> Vec<ScoreRecord<'a>> {
        spans
            .iter()
            .zip(scores)
            .map(|(span, &score)| ScoreRecord {
                score,
                confidence: 1.0,
                answer: Some(span),
                begin: Some(span.begin),
                end: Some(span.end),
            })
            .collect()
    }

    fn ranked_indices(evaluation: &Evaluation<'_>) -> Vec<usize> {
        evaluation.ranked.iter().map(|r| r.index).collect()
    }

    #[test]
    fn test_ranking_is_stable() {
        let spans = spans(4);
        let records = bound_records(&spans, &[2, 5, 2, 5]);
        let evaluation = evaluate(&records);
        assert_eq!(ranked_indices(&evaluation), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let spans = spans(6);
        let records = bound_records(&spans, &[1, 3, 3, 0, 1, 3]);
        let first = evaluate(&records);
        for _ in 0..10 {
            assert_eq!(evaluate(&records), first);
        }
        assert_eq!(ranked_indices(&first), vec![1, 2, 5, 0, 4, 3]);
    }

    #[test]
    fn test_precision_is_mean_score() {
        let spans = spans(3);
        let records = bound_records(&spans, &[4, 0, 2]);
        let evaluation = evaluate(&records);
        assert_eq!(evaluation.precision, Precision::Defined(2.0));
    }

    #[test]
    fn test_covering_span_uses_stream_order() {
        let spans = spans(3);
        let records = bound_records(&spans, &[0, 9, 1]);
        let evaluation = evaluate(&records);
        assert_eq!(evaluation.begin, 0);
        assert_eq!(evaluation.end, 25);
    }

    #[test]
    fn test_single_answer_span() {
        let spans = spans(1);
        let records = bound_records(&spans, &[1]);
        let evaluation = evaluate(&records);
        assert_eq!((evaluation.begin, evaluation.end), (0, 5));
    }

    #[test]
    fn test_zero_answers_undefined() {
        let evaluation = evaluate(&[]);
        assert_eq!(evaluation.precision, Precision::Undefined);
        assert!(evaluation.ranked.is_empty());
        assert_eq!((evaluation.begin, evaluation.end), (0, 0));
    }

    #[test]
    fn test_unbound_records_excluded() {
        let spans = spans(2);
        let mut records = bound_records(&spans, &[1, 3]);
        let mut unbound = ScoreRecord::new();
        unbound.score = 7;
        records.insert(1, unbound);

        let evaluation = evaluate(&records);

        assert_eq!(ranked_indices(&evaluation), vec![2, 0]);
        assert_eq!(evaluation.precision, Precision::Defined(2.0));
    }

    #[test]
    fn test_only_unbound_records_undefined() {
        let records = vec![ScoreRecord::new(), ScoreRecord::new()];
        let evaluation = evaluate(&records);
        assert!(!evaluation.precision.is_defined());
        assert!(evaluation.ranked.is_empty());
    }
}
