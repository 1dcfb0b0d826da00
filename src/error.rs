use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while summarising a spending file.
///
/// Per-line problems (a missing comma, an empty category, a bad amount) are
/// reported wrapped in [`Error::Line`], so that the diagnostic names the
/// offending line. In lenient mode these are collected as diagnostics and
/// the line is skipped; in strict mode the first one ends the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("invalid format (expected category,amount)")]
    MalformedLine,
    #[error("missing category")]
    MissingCategory,
    #[error("missing amount")]
    MissingAmount,
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("negative amount: {0:?}")]
    NegativeAmount(String),
    #[error("no valid spending data found")]
    NoValidData,
    #[error("line {line}: {error}")]
    Line { line: usize, error: Box<Error> },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Attaches the 1-based input line number to a per-line error.
    #[must_use]
    pub fn at(self, line: usize) -> Self {
        Self::Line {
            line,
            error: Box::new(self),
        }
    }

    /// Returns the underlying error, looking through any line number.
    #[must_use]
    pub fn kind(&self) -> &Self {
        match self {
            Self::Line { error, .. } => error.kind(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
