//! Typed models

mod artwork;
mod id;

pub use artwork::*;
pub use id::*;
