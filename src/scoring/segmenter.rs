//! Splits a tagged-token stream into the question and its answer groups.

use super::{Markers, ScoreRecord};
use crate::annotation::TaggedToken;

/// Question tokens and their tags, in stream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Question<'a> {
    pub tokens: Vec<&'a str>,
    pub tags: Vec<&'a str>,
}

impl<'a> Question<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// (text, tag) pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.tokens.iter().copied().zip(self.tags.iter().copied())
    }
}

/// Tokens, tags and start offsets of one candidate answer.
///
/// Groups are identified by their position in the stream; the first start
/// offset is the only link to the answer span they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerGroup<'a> {
    pub tokens: Vec<&'a str>,
    pub tags: Vec<&'a str>,
    pub begins: Vec<usize>,
}

impl<'a> AnswerGroup<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Start offset of the first token, if the group has any
    pub fn first_begin(&self) -> Option<usize> {
        self.begins.first().copied()
    }

    /// (text, tag) pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.tokens.iter().copied().zip(self.tags.iter().copied())
    }
}

/// Result of segmenting one stream. `groups` and `records` are index-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation<'a> {
    pub question: Question<'a>,
    pub groups: Vec<AnswerGroup<'a>>,
    pub records: Vec<ScoreRecord<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Question,
    Answer,
}

/// Segment a tagged-token stream in a single left-to-right pass.
///
/// - the question marker switches to question mode and is dropped
/// - the answer marker opens a new answer group (with a fresh score record),
///   switches to answer mode and is dropped
/// - gold labels are dropped
/// - anything else goes to the question or the current answer group
///
/// Tokens before any marker belong to the question. A stream without answer
/// markers yields no groups.
pub fn segment<'a>(tokens: &'a [TaggedToken], markers: &Markers) -> Segmentation<'a> {
    let (segmentation, _) = tokens.iter().fold(
        (Segmentation::default(), Mode::Question),
        |(mut seg, mode), token| {
            let text = token.text.as_str();

            if text == markers.question {
                return (seg, Mode::Question);
            }

            if text == markers.answer {
                seg.groups.push(AnswerGroup::default());
                seg.records.push(ScoreRecord::new());
                return (seg, Mode::Answer);
            }

            if markers.is_label(text) {
                return (seg, mode);
            }

            match mode {
                Mode::Question => {
                    seg.question.tokens.push(text);
                    seg.question.tags.push(token.pos.as_str());
                }
                Mode::Answer => {
                    // Answer mode is only entered after a group was pushed
                    if let Some(group) = seg.groups.last_mut() {
                        group.tokens.push(text);
                        group.tags.push(token.pos.as_str());
                        group.begins.push(token.begin);
                    }
                }
            }

            (seg, mode)
        },
    );

    log::debug!(
        "Segmented {} tokens: {} question tokens, {} answer groups",
        tokens.len(),
        segmentation.question.len(),
        segmentation.groups.len()
    );

    segmentation
}
