//! Annotation types: tagged tokens, answer spans and the per-question document
//! that holds them.
//!
//! A [`Document`] plays the part of the annotation store for one question: the
//! tagger output lives in `tokens`, and the candidate answers in `answers`.

use serde::{Deserialize, Serialize};

/// One token produced by an external tokenizer/POS tagger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Surface text.
    pub text: String,
    /// Part-of-speech tag.
    pub pos: String,
    /// Start character offset (inclusive).
    pub begin: usize,
    /// End character offset (exclusive).
    pub end: usize,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, pos: impl Into<String>, begin: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            pos: pos.into(),
            begin,
            end,
        }
    }
}

/// A candidate answer span, identified by its character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSpan {
    pub begin: usize,
    pub end: usize,
    /// Surface text of the constituent tokens, for display.
    #[serde(default)]
    pub tokens: Vec<String>,
    /// Gold relevance label, when the input carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold: Option<bool>,
}

impl AnswerSpan {
    /// Token text joined by single spaces
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// One question with its candidate answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Source name (usually the relative file path).
    #[serde(default)]
    pub name: String,
    /// Reconstructed document text the offsets point into, if known.
    #[serde(default)]
    pub text: String,
    pub tokens: Vec<TaggedToken>,
    #[serde(default)]
    pub answers: Vec<AnswerSpan>,
}

impl Document {
    /// Number of answers carrying a gold label
    pub fn labelled_answers(&self) -> usize {
        self.answers.iter().filter(|a| a.gold.is_some()).count()
    }
}
