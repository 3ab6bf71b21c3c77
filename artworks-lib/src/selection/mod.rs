//! Cross-page selection
//!
//! The selection outlives pagination: the [`SelectionStore`] holds the
//! identifiers the user marked, [`reconcile`] folds page-local checkbox
//! events into it, and [`SelectionSession::select_range`] walks the remote
//! collection page by page to select more items than are loaded.

mod range;
mod reconcile;
mod session;
mod store;

pub use range::*;
pub use reconcile::*;
pub use session::*;
pub use store::*;
