//! Domain layer for Finboard.
//!
//! Models, ports and validation shared by the infrastructure and application
//! crates. Nothing here performs I/O.

pub mod analysis;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod search;
pub mod storage;
pub mod validation;

mod serde_util;

// Re-export common error type
pub use error::{FinboardError, Result};
