pub mod config;
pub mod error;
pub mod annotation;
pub mod ingest;
pub mod scoring;
pub mod eval;
pub mod pipeline;
pub mod report;

pub use config::Config;
pub use error::{QarankError, Result};
pub use annotation::{AnswerSpan, Document, TaggedToken};
pub use pipeline::{evaluate_document, DocumentEvaluation, ScoringOptions};
