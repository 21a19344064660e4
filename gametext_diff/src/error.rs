use thiserror::Error;

/// Failure that aborts a comparison run.
///
/// Validation findings are never errors; they are reported as issues.
#[derive(Debug, Error)]
pub enum CompareError {
    /// The LCS table for one line pair would exceed the configured limit.
    #[error("character diff needs {cells} table cells, limit is {limit}")]
    DiffTooLarge { cells: usize, limit: usize },

    /// A configured tag name produced an unusable pattern.
    #[error("invalid tag pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A panic caught at the comparison entry point.
    #[error("internal comparison failure: {0}")]
    Internal(String),
}
