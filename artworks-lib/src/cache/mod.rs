//! Page cache
//!
//! Accumulates every item the page fetcher has returned during the session so
//! identifiers that were already fetched can be rendered or counted without
//! going back to the network.

mod memory;

pub use memory::*;
