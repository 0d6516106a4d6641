//! Outcome and error taxonomy for a comparison run (spec.md §7).

use std::path::PathBuf;
use thiserror::Error;

/// Result of a completed comparison that did not hit an error.
///
/// `Identical` and `Different` are outcomes, not exceptions: the engine
/// never panics or returns an `Err` just because the files differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    Identical,
    Different,
}

impl CompareOutcome {
    pub fn is_identical(self) -> bool {
        matches!(self, CompareOutcome::Identical)
    }
}

/// Error taxonomy for a comparison run.
///
/// Only conditions that prevent the engine from reaching an outcome are
/// represented here; "files differ" is `CompareOutcome::Different`, not
/// an error.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error("I/O error comparing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("memory error: {0}")]
    Memory(String),
}

impl CompareError {
    pub fn invalid_param(reason: impl Into<String>) -> Self {
        CompareError::InvalidParam(reason.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompareError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn memory(reason: impl Into<String>) -> Self {
        CompareError::Memory(reason.into())
    }
}

pub type CompareResult<T> = Result<T, CompareError>;
