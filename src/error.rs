use thiserror::Error;

use crate::index::pgm::MIN_EPSILON;

/// Errors reported by constructors and queries.
///
/// All errors are raised synchronously by the operation that caused them;
/// nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Construction was attempted with an epsilon below the supported minimum.
    #[error("epsilon must be at least {min}, got {epsilon}", min = MIN_EPSILON)]
    EpsilonTooSmall { epsilon: usize },

    /// A slice was requested with a step of zero.
    #[error("slice step cannot be zero")]
    ZeroStep,

    /// Positional access outside `[-len, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// `index_of` did not find the key within the requested bounds.
    #[error("{key} is not in the container")]
    KeyNotFound { key: String },

    /// A value handed to a cast-ingestion constructor cannot be represented
    /// as the container's key type.
    #[error("value cannot be represented as the key type")]
    UnsupportedInput,

    /// An intersection operand still contains duplicates.
    #[error("intersection requires operands without duplicates")]
    DuplicateOperand,
}
