//! Append-only feedback log for shelter stay predictions.
//!
//! Each row records one submitted form, what the model predicted, whether
//! the user found it right, and optionally how many days the animal really
//! stayed. The log is a plain CSV file with a single writer assumed: rows are
//! appended whole and the file is never rewritten.

use std::path::PathBuf;

mod log;
mod record;
mod stats;

pub use log::FeedbackLog;
pub use record::*;
pub use stats::*;

/// Errors raised by the feedback log.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("feedback log I/O failed")]
    Io(#[from] std::io::Error),

    #[error("feedback log is not valid CSV")]
    Csv(#[from] csv::Error),

    #[error("feedback log {} has columns {found:?}, expected {expected:?}", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("feedback row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}
