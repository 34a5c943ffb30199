//! Asset search domain models.

use serde::{Deserialize, Serialize};

/// A tradable asset matching a search query. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Observable state of one search interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No query, or results were cleared
    #[default]
    Idle,
    /// Waiting for typing to pause
    Debouncing { query: String },
    /// Remote lookup in flight
    Searching { query: String },
    /// Lookup finished; `results` may be empty
    Ready {
        query: String,
        results: Vec<SearchResult>,
    },
    /// Lookup failed; distinct from an empty result set
    Failed { query: String, message: String },
}

impl SearchState {
    /// Query this state belongs to, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Debouncing { query }
            | Self::Searching { query }
            | Self::Ready { query, .. }
            | Self::Failed { query, .. } => Some(query),
        }
    }

    /// True once the lookup for the current query has finished.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Idle | Self::Ready { .. } | Self::Failed { .. })
    }
}
