use super::Parser;
use crate::annotation::{AnswerSpan, Document, TaggedToken};
use crate::error::Result;
use crate::scoring::Markers;

/// Parser for line-oriented POS-tagged text
///
/// Each non-blank line holds whitespace-separated `text/TAG` tokens; the tag
/// is split off at the last `/`, and a token without one gets an empty tag.
/// A line starting with the answer marker becomes an answer span over the
/// tokens after the marker, leaving out gold labels (a label directly after
/// the marker is read as the answer's gold relevance):
///
/// ```text
/// Q/NNP John/NNP loves/VBZ Mary/NNP
/// A/DT 1/CD John/NNP loves/VBZ Mary/NNP
/// A/DT 0/CD Mary/NNP loves/VBZ John/NNP
/// ```
///
/// Offsets are character offsets into the rebuilt text: tokens joined by a
/// single space, lines by a newline.
pub struct TaggedTextParser {
    markers: Markers,
}

impl TaggedTextParser {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    /// Answer spans for one line that starts with the answer marker.
    ///
    /// Spans cover exactly the tokens the segmenter keeps, so every label
    /// token is skipped and each span begins at its first kept token. A
    /// further answer marker on the line opens a new group in the stream, so
    /// the line is split there; a question marker ends the answer text. The
    /// gold label directly after the leading marker applies to every piece.
    fn answer_spans(&self, line: &[TaggedToken]) -> Vec<AnswerSpan> {
        let rest = line.get(1..).unwrap_or_default();

        let gold = match rest.first() {
            Some(t) if t.text == self.markers.positive => Some(true),
            Some(t) if t.text == self.markers.negative => Some(false),
            _ => None,
        };

        let mut pieces: Vec<Vec<&TaggedToken>> = vec![Vec::new()];
        for token in rest {
            if token.text == self.markers.question {
                break;
            }
            if token.text == self.markers.answer {
                pieces.push(Vec::new());
            } else if !self.markers.is_label(&token.text) {
                if let Some(piece) = pieces.last_mut() {
                    piece.push(token);
                }
            }
        }

        pieces
            .into_iter()
            .filter_map(|piece| {
                let first = piece.first()?;
                let last = piece.last()?;
                Some(AnswerSpan {
                    begin: first.begin,
                    end: last.end,
                    tokens: piece.iter().map(|t| t.text.clone()).collect(),
                    gold,
                })
            })
            .collect()
    }
}

/// Split `text/TAG` at the last slash
fn split_tagged(raw: &str) -> (&str, &str) {
    match raw.rsplit_once('/') {
        Some((text, tag)) if !text.is_empty() => (text, tag),
        _ => (raw, ""),
    }
}

impl Parser for TaggedTextParser {
    fn can_parse(&self, extension: &str) -> bool {
        matches!(extension, "txt" | "tag" | "pos")
    }

    fn parse(&self, content: &str, name: &str) -> Result<Document> {
        let mut text = String::new();
        let mut offset = 0usize;
        let mut tokens = Vec::new();
        let mut answers = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            if !text.is_empty() {
                text.push('\n');
                offset += 1;
            }

            let mut line_tokens = Vec::new();
            for (i, raw) in line.split_whitespace().enumerate() {
                if i > 0 {
                    text.push(' ');
                    offset += 1;
                }

                let (surface, pos) = split_tagged(raw);
                let begin = offset;
                offset += surface.chars().count();
                text.push_str(surface);
                line_tokens.push(TaggedToken::new(surface, pos, begin, offset));
            }

            let starts_answer = line_tokens
                .first()
                .map_or(false, |t| t.text == self.markers.answer);
            if starts_answer {
                let markers_inside = line_tokens[1..]
                    .iter()
                    .filter(|t| t.text == self.markers.answer || t.text == self.markers.question)
                    .count();
                if markers_inside > 0 {
                    log::warn!(
                        "{}:{}: answer line contains {} marker token(s) and is split there",
                        name,
                        line_no + 1,
                        markers_inside
                    );
                }

                let spans = self.answer_spans(&line_tokens);
                if spans.is_empty() {
                    log::warn!("{}:{}: answer line has no tokens", name, line_no + 1);
                }
                answers.extend(spans);
            }

            tokens.extend(line_tokens);
        }

        log::debug!("Parsed {}: {} tokens, {} answers", name, tokens.len(), answers.len());

        Ok(Document {
            name: name.to_string(),
            text,
            tokens,
            answers,
        })
    }
}
