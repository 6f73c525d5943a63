use thiserror::Error;

/// Main error type for QARank
#[derive(Error, Debug)]
pub enum QarankError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parse errors in annotated input files
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using QarankError
pub type Result<T> = std::result::Result<T, QarankError>;
