use super::Parser;
use crate::annotation::Document;
use crate::error::{QarankError, Result};

/// JSON annotation parser
///
/// Reads a serialized [`Document`]: the tagged token stream plus the answer
/// spans, e.g.
///
/// ```json
/// {
///   "tokens": [{"text": "Q", "pos": "NNP", "begin": 0, "end": 1}],
///   "answers": [{"begin": 8, "end": 17, "tokens": ["dog", "jumps"], "gold": true}]
/// }
/// ```
pub struct JsonParser;

impl Parser for JsonParser {
    fn can_parse(&self, extension: &str) -> bool {
        extension == "json"
    }

    fn parse(&self, content: &str, name: &str) -> Result<Document> {
        let mut doc: Document = serde_json::from_str(content)?;

        if doc.name.is_empty() {
            doc.name = name.to_string();
        }

        if let Some(token) = doc.tokens.iter().find(|t| t.end < t.begin) {
            return Err(QarankError::InvalidInput(format!(
                "{}: token {:?} ends before it begins ({}..{})",
                name, token.text, token.begin, token.end
            )));
        }

        if let Some(answer) = doc.answers.iter().find(|a| a.end < a.begin) {
            return Err(QarankError::InvalidInput(format!(
                "{}: answer span ends before it begins ({}..{})",
                name, answer.begin, answer.end
            )));
        }

        log::debug!(
            "Parsed {}: {} tokens, {} answers",
            doc.name,
            doc.tokens.len(),
            doc.answers.len()
        );

        Ok(doc)
    }
}
