//! Error type shared by all fallible transforms.

/// An error type for the transform functions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Error when the channel count is wrong for the requested operation.
    #[error("Invalid image shape: expected {expected} channel(s), got {got}")]
    InvalidShape {
        /// Channel counts the operation accepts, e.g. "1 or 3".
        expected: &'static str,
        /// Channel count of the supplied image.
        got: usize,
    },

    /// Error when a numeric argument is out of its valid range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Error when the histogram has zero variance (blank or empty image)
    /// and normalization is undefined.
    #[error("Degenerate input: histogram has zero variance")]
    DegenerateInput,

    /// Error when the quantizer partition degenerates: an empty first
    /// interval, or a boundary sequence that left monotonic order.
    #[error("Numeric divergence: quantizer partition degenerated")]
    NumericDivergence,
}

/// Result alias used across the filter modules.
pub type Result<T> = std::result::Result<T, TransformError>;
