//! Artworks selection library
//!
//! Browse a paginated remote collection one page at a time while keeping a
//! selection that spans pages the client has never loaded.

pub mod api;
pub mod cache;
pub mod error;
pub mod model;
pub mod selection;

mod client;
#[cfg(test)]
mod testing;

pub use client::*;
