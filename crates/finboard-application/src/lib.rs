//! Application layer for Finboard.
//!
//! The client-side session and data-synchronization services. Each service
//! receives its collaborators explicitly; nothing here is a global.

pub mod analysis_flow;
pub mod record_cache;
pub mod search_debouncer;
pub mod selection;
pub mod services;
pub mod session_store;

pub use analysis_flow::{AnalysisRequestFlow, Submission};
pub use record_cache::RecordCache;
pub use search_debouncer::SearchDebouncer;
pub use selection::Selection;
pub use services::{FinboardServices, StartupReport};
pub use session_store::SessionStore;
