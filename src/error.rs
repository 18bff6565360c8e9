use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatmulError {
    #[error("shape mismatch: cannot multiply {left}x{left} by {right}x{right}")]
    ShapeMismatch { left: usize, right: usize },
    #[error("matrix is not square: row {row} has {got} elements, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("invalid configuration: {parameter} must be positive, got {value}")]
    InvalidConfiguration {
        parameter: &'static str,
        value: usize,
    },
    #[error("parallel execution unavailable: {reason}")]
    ConcurrencyUnavailable { reason: String },
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl MatmulError {
    /// Whether a caller can retry the multiply with a sequential strategy.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MatmulError::ConcurrencyUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatmulError>;
