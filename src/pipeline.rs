//! One question end to end: segment → score → bind → evaluate.

use serde::Serialize;

use crate::annotation::Document;
use crate::config::Config;
use crate::eval::{evaluate, gold_precision_at_n, Evaluation};
use crate::scoring::{bind, score_answers, segment, BindSummary, Markers, OverlapMode};

/// Settings for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct ScoringOptions {
    pub markers: Markers,
    pub mode: OverlapMode,
}

impl ScoringOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            markers: config.segmenter.markers(),
            mode: config.scoring.overlap_mode,
        }
    }
}

/// Evaluation of one document plus the per-stage diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentEvaluation<'a> {
    pub name: &'a str,
    pub question_tokens: usize,
    /// Overlap score per answer group, in stream order.
    pub scores: Vec<u32>,
    pub binding: BindSummary,
    pub evaluation: Evaluation<'a>,
    /// Precision@N against gold labels, when the answers carry them.
    pub gold_precision: Option<f64>,
}

/// Run the full pipeline for one question and its answers.
pub fn evaluate_document<'a>(doc: &'a Document, options: &ScoringOptions) -> DocumentEvaluation<'a> {
    let mut seg = segment(&doc.tokens, &options.markers);

    score_answers(&seg.question, &seg.groups, &mut seg.records, options.mode);
    let scores: Vec<u32> = seg.records.iter().map(|r| r.score).collect();

    let binding = bind(&doc.answers, &seg.groups, &mut seg.records);
    if binding.unbound > 0 {
        log::warn!(
            "{}: {} answer group(s) did not match any answer span",
            doc.name,
            binding.unbound
        );
    }

    let evaluation = evaluate(&seg.records);
    let gold_precision = gold_precision_at_n(&evaluation.ranked);

    log::debug!(
        "{}: {} answers scored, {} bound, {} of {} spans labelled, precision {}",
        doc.name,
        scores.len(),
        binding.bound,
        doc.labelled_answers(),
        doc.answers.len(),
        evaluation.precision
    );

    DocumentEvaluation {
        name: &doc.name,
        question_tokens: seg.question.len(),
        scores,
        binding,
        evaluation,
        gold_precision,
    }
}
