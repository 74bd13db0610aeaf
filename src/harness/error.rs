//! Error types for the sweep harness

use thiserror::Error;

/// Result type alias using the harness error
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Failures of a comparison run. The exp engine itself never fails.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// Sweep parameters that cannot produce a finite increasing sequence
    #[error("Invalid sweep configuration: {0}")]
    InvalidConfig(String),

    /// The results sink could not store or read back rows
    #[error("Results sink failed: {0}")]
    Sink(#[from] std::io::Error),

    /// A row does not carry one value per candidate
    #[error("Row has {got} candidate values, expected {expected}")]
    Shape {
        /// Number of candidates the sink was opened with
        expected: usize,
        /// Number of values in the row
        got: usize,
    },

    /// Reference name not recognised (or its feature is disabled)
    #[error("Unknown reference '{0}'")]
    UnknownReference(String),
}
