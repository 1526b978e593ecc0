//! Error handling for the stock report engine
//!
//! Data irregularities (missing colors, sizes or prices) never surface as
//! errors; they normalize to safe defaults during layout. The only failures
//! that propagate are those of the drawing backend itself.

use thiserror::Error;

/// Report generation error types
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("drawing surface error: {0}")]
    Surface(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for report generation
pub type ReportResult<T> = Result<T, ReportError>;
