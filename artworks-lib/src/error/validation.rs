//! Validation error types

/// A caller-supplied value was rejected before any fetch or mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The count could not be parsed as an integer.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// The count was negative.
    #[error("count must be positive, got {0}")]
    Negative(i64),

    /// The count does not fit in the platform's integer range.
    #[error("count {0} is too large")]
    TooLarge(String),

    /// The count was zero.
    #[error("count must be at least 1")]
    Zero,

    /// The count is larger than the currently known maximum.
    #[error("count {requested} exceeds the maximum of {max}")]
    ExceedsMaximum {
        /// The requested count.
        requested: usize,
        /// The largest count currently accepted.
        max: usize,
    },

    /// A page must hold at least one item.
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),

    /// Page indices are 1-based.
    #[error("invalid page index {0}, pages start at 1")]
    InvalidPage(u32),

    /// An operation needed the visible page, but none has been loaded.
    #[error("no page is loaded")]
    NoPageLoaded,
}
