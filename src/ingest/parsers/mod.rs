pub mod json;
pub mod tagged;

use crate::annotation::Document;
use crate::error::{QarankError, Result};
use crate::scoring::Markers;

/// Trait for annotated-input parsers
pub trait Parser {
    /// Check if this parser can handle the given file extension
    fn can_parse(&self, extension: &str) -> bool;

    /// Parse file content into a document named `name`
    fn parse(&self, content: &str, name: &str) -> Result<Document>;
}

/// Parser registry that selects appropriate parser by extension
pub struct ParserRegistry {
    parsers: Vec<Box<dyn Parser>>,
}

impl ParserRegistry {
    /// Create a new parser registry with all built-in parsers
    pub fn new(markers: Markers) -> Self {
        let mut registry = Self {
            parsers: Vec::new(),
        };

        registry.register(Box::new(tagged::TaggedTextParser::new(markers)));
        registry.register(Box::new(json::JsonParser));

        registry
    }

    /// Register a parser
    pub fn register(&mut self, parser: Box<dyn Parser>) {
        self.parsers.push(parser);
    }

    /// Find a parser that can handle the given extension
    pub fn find_parser(&self, extension: &str) -> Option<&dyn Parser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(extension))
            .map(|p| p.as_ref())
    }

    /// Parse content using the appropriate parser for the extension
    pub fn parse(&self, content: &str, name: &str, extension: &str) -> Result<Document> {
        let parser = self.find_parser(extension)
            .ok_or_else(|| QarankError::Parse(
                format!("No parser found for extension: {:?} ({})", extension, name)
            ))?;

        parser.parse(content, name)
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new(Markers::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_registry() {
        let registry = ParserRegistry::default();

        assert!(registry.find_parser("txt").is_some());
        assert!(registry.find_parser("tag").is_some());
        assert!(registry.find_parser("pos").is_some());
        assert!(registry.find_parser("json").is_some());
        assert!(registry.find_parser("md").is_none());
        assert!(registry.find_parser("").is_none());
    }

    #[test]
    fn test_parse_dispatches_by_extension() {
        let registry = ParserRegistry::default();

        let doc = registry.parse("Q dog/NN\nA 1 dog/NN", "q.txt", "txt").unwrap();
        assert_eq!(doc.answers.len(), 1);

        let json = r#"{"tokens": [{"text": "Q", "pos": "NNP", "begin": 0, "end": 1}]}"#;
        let doc = registry.parse(json, "q.json", "json").unwrap();
        assert_eq!(doc.tokens.len(), 1);
    }

    #[test]
    fn test_parse_unknown_extension() {
        let registry = ParserRegistry::default();
        let err = registry.parse("Q dog", "q.md", "md").unwrap_err();
        assert!(matches!(err, QarankError::Parse(_)));
        assert!(err.to_string().contains("q.md"));
    }
}
