//! Error types

mod api;
mod validation;

pub use api::*;
pub use validation::*;

/// Top-level error for the artworks library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page fetch failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A caller-supplied value was rejected before any work was done.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
