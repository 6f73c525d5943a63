//! Rendering of evaluation results as text or JSON.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::error::Result;
use crate::eval::{mean, Precision};
use crate::pipeline::DocumentEvaluation;

/// Output format of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// One displayed answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportAnswer {
    /// 1-based position among displayed answers.
    pub rank: usize,
    pub text: String,
    pub score: u32,
    pub begin: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gold: Option<bool>,
}

/// Report for one question.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub name: String,
    pub begin: usize,
    pub end: usize,
    pub precision: Precision,
    pub gold_precision: Option<f64>,
    pub answers: Vec<ReportAnswer>,
    /// Answer groups that matched no answer span.
    pub unbound: usize,
    /// Ranked answers hidden because an identical answer ranked higher.
    pub duplicates_hidden: usize,
}

impl DocumentReport {
    /// Build the display form of one evaluation.
    ///
    /// With `dedupe`, an answer whose token text equals that of a higher
    /// ranked answer is hidden.
    pub fn new(result: &DocumentEvaluation<'_>, dedupe: bool) -> Self {
        let mut seen: HashSet<&[String]> = HashSet::new();
        let mut answers = Vec::with_capacity(result.evaluation.ranked.len());
        let mut duplicates_hidden = 0;

        for ranked in &result.evaluation.ranked {
            if dedupe && !seen.insert(ranked.answer.tokens.as_slice()) {
                duplicates_hidden += 1;
                continue;
            }
            answers.push(ReportAnswer {
                rank: answers.len() + 1,
                text: ranked.answer.text(),
                score: ranked.score,
                begin: ranked.answer.begin,
                end: ranked.answer.end,
                gold: ranked.answer.gold,
            });
        }

        Self {
            name: result.name.to_string(),
            begin: result.evaluation.begin,
            end: result.evaluation.end,
            precision: result.evaluation.precision,
            gold_precision: result.gold_precision,
            answers,
            unbound: result.binding.unbound,
            duplicates_hidden,
        }
    }
}

/// Aggregate over all evaluated documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub documents: usize,
    /// Documents whose precision is undefined (no bound answers).
    pub undefined_precision: usize,
    /// Mean of the defined overlap precisions.
    pub mean_precision: Option<f64>,
    /// Mean gold Precision@N over documents that have one.
    pub mean_gold_precision: Option<f64>,
}

impl Summary {
    pub fn from_documents(documents: &[DocumentReport]) -> Self {
        Self {
            documents: documents.len(),
            undefined_precision: documents
                .iter()
                .filter(|d| !d.precision.is_defined())
                .count(),
            mean_precision: mean(documents.iter().filter_map(|d| d.precision.value())),
            mean_gold_precision: mean(documents.iter().filter_map(|d| d.gold_precision)),
        }
    }
}

/// Full report: per-document results plus the summary.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub documents: Vec<DocumentReport>,
    pub summary: Summary,
}

impl Report {
    pub fn new(documents: Vec<DocumentReport>) -> Self {
        let summary = Summary::from_documents(&documents);
        Self { documents, summary }
    }

    /// Write the report in the requested format
    pub fn write<W: Write>(&self, out: &mut W, format: ReportFormat) -> Result<()> {
        match format {
            ReportFormat::Text => self.write_text(out)?,
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for doc in &self.documents {
            writeln!(out, "== {} ==", doc.name)?;

            if doc.answers.is_empty() {
                writeln!(out, "No answers.")?;
            }
            for answer in &doc.answers {
                let gold = match answer.gold {
                    Some(true) => " [relevant]",
                    Some(false) => " [irrelevant]",
                    None => "",
                };
                writeln!(
                    out,
                    "{:>3}. {} (score: {}){}",
                    answer.rank, answer.text, answer.score, gold
                )?;
            }

            writeln!(out, "Precision: {}", doc.precision)?;
            writeln!(out, "Gold P@N:  {}", format_optional(doc.gold_precision))?;
            writeln!(out, "Span:      {}..{}", doc.begin, doc.end)?;
            if doc.unbound > 0 {
                writeln!(out, "Unbound answers: {}", doc.unbound)?;
            }
            if doc.duplicates_hidden > 0 {
                writeln!(out, "Duplicate answers hidden: {}", doc.duplicates_hidden)?;
            }
            writeln!(out)?;
        }

        let summary = &self.summary;
        writeln!(out, "=== Summary ===")?;
        writeln!(out, "Documents:           {}", summary.documents)?;
        writeln!(out, "Undefined precision: {}", summary.undefined_precision)?;
        writeln!(out, "Mean precision:      {}", format_optional(summary.mean_precision))?;
        writeln!(out, "Mean gold P@N:       {}", format_optional(summary.mean_gold_precision))?;
        Ok(())
    }
}

fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    }
}
