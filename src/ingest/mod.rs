pub mod walker;
pub mod parsers;

pub use walker::{FileMetadata, collect_inputs, discover_files};
pub use parsers::{Parser, ParserRegistry};

use crate::annotation::Document;
use crate::error::{QarankError, Result};

/// Convenience function to load a single annotated input file
///
/// Reads the file and parses it with the parser registered for its extension.
pub fn load_document(file: &FileMetadata, registry: &ParserRegistry) -> Result<Document> {
    let content = std::fs::read_to_string(&file.absolute_path)
        .map_err(QarankError::Io)?;

    registry.parse(&content, &file.relative_path, &file.extension)
}
