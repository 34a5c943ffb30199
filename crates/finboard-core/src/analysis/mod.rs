//! Analysis domain module.
//!
//! - `model`: the persisted [`AnalysisRecord`] and its metric categories
//! - `form`: raw form input and its validation into an [`AnalysisRequest`]

mod form;
mod model;

pub use form::{AnalysisForm, MIN_YEAR};
pub use model::{AnalysisRecord, AnalysisRequest, MetricGroup, Resultado};
