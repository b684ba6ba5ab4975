use thiserror::Error;

use crate::evaluate::ExpressionError;

/// Error types for the numcore library.
#[derive(Error, Debug)]
pub enum NumcoreError {
    /// Error for malformed inputs: reversed bounds, non-positive tolerances,
    /// zero partition counts, unsupported fit degrees, dimension mismatches.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error indicating the normal equations of a fit are (near-)degenerate.
    #[error("Degenerate system: {0}")]
    DegenerateSystem(String),

    /// Error indicating a singular matrix was encountered.
    #[error("Singular matrix encountered")]
    SingularMatrix,

    /// Error indicating too few data points for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error indicating a 1-D search exhausted its hard iteration cap without
    /// satisfying the interval-width stopping criterion. Usually means the
    /// function is not unimodal on the interval.
    #[error("Iteration limit of {0} exceeded without convergence")]
    IterationLimitExceeded(usize),

    /// Error during formula parsing or evaluation.
    #[error("Formula error: {0}")]
    Formula(#[from] ExpressionError),

    /// Generic error for cases that don't fit the other categories.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for numcore operations.
pub type Result<T> = std::result::Result<T, NumcoreError>;

/// Extensions for converting from other error types.
impl From<String> for NumcoreError {
    fn from(s: String) -> Self {
        NumcoreError::Other(s)
    }
}

impl From<&str> for NumcoreError {
    fn from(s: &str) -> Self {
        NumcoreError::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NumcoreError::InvalidArgument("interval bounds reversed".to_string());
        assert!(format!("{}", err).contains("interval bounds reversed"));

        let err = NumcoreError::IterationLimitExceeded(1000);
        assert!(format!("{}", err).contains("1000"));
    }

    #[test]
    fn test_error_conversion() {
        let str_err: NumcoreError = "test error".into();
        match str_err {
            NumcoreError::Other(s) => assert_eq!(s, "test error"),
            _ => panic!("Expected Other variant"),
        }
    }
}
