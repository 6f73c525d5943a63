//! Binds score records to answer spans by start offset.

use serde::Serialize;
use std::collections::HashMap;

use super::{AnswerGroup, ScoreRecord};
use crate::annotation::AnswerSpan;

/// Outcome counts of one binding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BindSummary {
    /// Records attached to a span.
    pub bound: usize,
    /// Non-empty groups with no span at their first offset.
    pub unbound: usize,
    /// Empty groups, never bound.
    pub skipped_empty: usize,
    /// Spans sharing a begin offset with an earlier span.
    pub duplicate_offsets: usize,
}

/// Attach each record to the span whose begin offset equals the first token
/// offset of its answer group.
///
/// When several spans share a begin offset the last one in `spans` wins.
/// Rebinding the same inputs yields the same result.
pub fn bind<'a>(
    spans: &'a [AnswerSpan],
    groups: &[AnswerGroup<'_>],
    records: &mut [ScoreRecord<'a>],
) -> BindSummary {
    let mut summary = BindSummary::default();

    let mut by_begin: HashMap<usize, &'a AnswerSpan> = HashMap::with_capacity(spans.len());
    for span in spans {
        if by_begin.insert(span.begin, span).is_some() {
            summary.duplicate_offsets += 1;
        }
    }

    if summary.duplicate_offsets > 0 {
        log::warn!(
            "{} answer span(s) share a begin offset with another span; the last one wins",
            summary.duplicate_offsets
        );
    }

    for (i, (group, record)) in groups.iter().zip(records.iter_mut()).enumerate() {
        let Some(first_begin) = group.first_begin() else {
            summary.skipped_empty += 1;
            continue;
        };

        match by_begin.get(&first_begin) {
            Some(&span) => {
                record.answer = Some(span);
                record.begin = Some(span.begin);
                record.end = Some(span.end);
                record.confidence = 1.0;
                summary.bound += 1;
            }
            None => {
                log::debug!(
                    "Answer group {} at offset {} has no matching answer span",
                    i,
                    first_begin
                );
                summary.unbound += 1;
            }
        }
    }

    summary
}
