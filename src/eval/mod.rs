//! Evaluation: answer ranking, overlap precision, and gold Precision@N.

pub mod metrics;
pub mod ranker;

pub use metrics::{gold_precision_at_n, mean, overlap_precision, Precision};
pub use ranker::{evaluate, Evaluation, RankedAnswer};
