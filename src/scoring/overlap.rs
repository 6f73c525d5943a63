//! Lexical overlap between each answer group and the question.

use serde::{Deserialize, Serialize};

use super::{AnswerGroup, Question, ScoreRecord};

/// How repeated matches of an answer token are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    /// One point for every (question token, answer token) pair whose text and
    /// tag both match. An answer token equal to two question tokens scores 2.
    #[default]
    Literal,
    /// Each answer token scores at most one point.
    Unique,
}

/// Overlap score of one answer group against the question.
///
/// Tokens match when both surface text and POS tag are equal. An empty
/// question or group scores 0.
pub fn overlap_score(question: &Question<'_>, group: &AnswerGroup<'_>, mode: OverlapMode) -> u32 {
    match mode {
        OverlapMode::Literal => {
            let mut score = 0;
            for q in question.pairs() {
                for a in group.pairs() {
                    if a == q {
                        score += 1;
                    }
                }
            }
            score
        }
        OverlapMode::Unique => group
            .pairs()
            .filter(|a| question.pairs().any(|q| q == *a))
            .count() as u32,
    }
}

/// Score every answer group into its index-aligned record.
///
/// Confidence is left untouched.
pub fn score_answers(
    question: &Question<'_>,
    groups: &[AnswerGroup<'_>],
    records: &mut [ScoreRecord<'_>],
    mode: OverlapMode,
) {
    debug_assert_eq!(groups.len(), records.len());

    for (i, (group, record)) in groups.iter().zip(records.iter_mut()).enumerate() {
        let score = overlap_score(question, group, mode);
        record.score += score;
        log::debug!("Answer group {} ({} tokens) scored {}", i, group.len(), score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question<'a>(tokens: &[&'a str], tags: &[&'a str]) -> Question<'a> {
        Question {
            tokens: tokens.to_vec(),
            tags: tags.to_vec(),
        }
    }

    fn group<'a>(tokens: &[&'a str], tags: &[&'a str]) -> AnswerGroup<'a> {
        AnswerGroup {
            tokens: tokens.to_vec(),
            tags: tags.to_vec(),
            begins: (0..tokens.len()).collect(),
        }
    }

    #[test]
    fn test_single_overlap() {
        let q = question(&["dog", "runs"], &["NN", "VBZ"]);
        let a = group(&["dog", "jumps"], &["NN", "VBZ"]);
        assert_eq!(overlap_score(&q, &a, OverlapMode::Literal), 1);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let q = question(&["dog", "runs"], &["NN", "VBZ"]);
        let a = group(&["cat", "sleeps"], &["NN", "VBZ"]);
        assert_eq!(overlap_score(&q, &a, OverlapMode::Literal), 0);
        assert_eq!(overlap_score(&q, &a, OverlapMode::Unique), 0);
    }

    #[test]
    fn test_tag_must_match() {
        let q = question(&["run"], &["VB"]);
        let a = group(&["run"], &["NN"]);
        assert_eq!(overlap_score(&q, &a, OverlapMode::Literal), 0);
    }

    #[test]
    fn test_literal_counts_every_pair() {
        let q = question(&["dog", "dog"], &["NN", "NN"]);
        let a = group(&["dog"], &["NN"]);
        assert_eq!(overlap_score(&q, &a, OverlapMode::Literal), 2);
    }

    #[test]
    fn test_unique_counts_answer_token_once() {
        let q = question(&["dog", "dog"], &["NN", "NN"]);
        let a = group(&["dog"], &["NN"]);
        assert_eq!(overlap_score(&q, &a, OverlapMode::Unique), 1);

        // Repeated answer tokens still count individually
        let a = group(&["dog", "dog"], &["NN", "NN"]);
        assert_eq!(overlap_score(&q, &a, OverlapMode::Unique), 2);
        assert_eq!(overlap_score(&q, &a, OverlapMode::Literal), 4);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let empty_q = Question::default();
        let empty_a = AnswerGroup::default();
        let a = group(&["dog"], &["NN"]);
        let q = question(&["dog"], &["NN"]);
        assert_eq!(overlap_score(&empty_q, &a, OverlapMode::Literal), 0);
        assert_eq!(overlap_score(&q, &empty_a, OverlapMode::Literal), 0);
    }

    #[test]
    fn test_score_answers_fills_aligned_records() {
        let q = question(&["dog", "runs"], &["NN", "VBZ"]);
        let groups = vec![
            group(&["dog", "jumps"], &["NN", "VBZ"]),
            group(&["cat", "sleeps"], &["NN", "VBZ"]),
            group(&["dog", "runs"], &["NN", "VBZ"]),
        ];
        let mut records = vec![ScoreRecord::new(); 3];
        score_answers(&q, &groups, &mut records, OverlapMode::Literal);

        let scores: Vec<u32> = records.iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![1, 0, 2]);
        assert!(records.iter().all(|r| r.confidence == 1.0));
    }

    #[test]
    fn test_mode_serde_names() {
        let mode: OverlapMode = serde_json::from_str("\"unique\"").unwrap();
        assert_eq!(mode, OverlapMode::Unique);
        assert_eq!(serde_json::to_string(&OverlapMode::Literal).unwrap(), "\"literal\"");
    }
}
