//! Benchmark error types.

use thiserror::Error;

/// Result type for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that can occur while building or scoring a benchmark.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BenchError {
    /// The matrix is degenerate for the requested computation.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Malformed matrix, dimension or parameter.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not enough samples to build a score curve.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// The scorer was queried outside of [0, 1].
    #[error("Accuracy {0} is outside of the scoring range [0, 1]")]
    OutOfRange(f64),

    /// A sampling runner failed or returned an inconsistent result.
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Export error: {0}")]
    Export(String),
}

impl From<serde_json::Error> for BenchError {
    fn from(e: serde_json::Error) -> Self {
        BenchError::Export(e.to_string())
    }
}

impl From<serde_yaml_ng::Error> for BenchError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        BenchError::Export(e.to_string())
    }
}
