//! Asset search domain module.

mod model;

pub use model::{SearchResult, SearchState};
