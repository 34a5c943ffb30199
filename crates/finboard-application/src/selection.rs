use crate::record_cache::RecordCache;
use finboard_core::analysis::AnalysisRecord;
use finboard_core::{FinboardError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The record currently on display.
///
/// Only holds an id; the record itself is always read from the cache.
pub struct Selection {
    cache: Arc<RecordCache>,
    selected: RwLock<Option<i64>>,
}

impl Selection {
    pub fn new(cache: Arc<RecordCache>) -> Self {
        Self {
            cache,
            selected: RwLock::new(None),
        }
    }

    /// Selects a cached record by id.
    pub async fn select(&self, id: i64) -> Result<AnalysisRecord> {
        let record = self
            .cache
            .get(id)
            .await
            .ok_or_else(|| FinboardError::not_found("analysis", id.to_string()))?;
        *self.selected.write().await = Some(id);
        Ok(record)
    }

    /// Selects the newest cached record, if there is one.
    pub async fn select_newest(&self) -> Option<AnalysisRecord> {
        let newest = self.cache.first().await;
        *self.selected.write().await = newest.as_ref().map(|r| r.id);
        newest
    }

    pub(crate) async fn set(&self, id: i64) {
        *self.selected.write().await = Some(id);
    }

    pub async fn selected_id(&self) -> Option<i64> {
        *self.selected.read().await
    }

    pub async fn selected(&self) -> Option<AnalysisRecord> {
        let id = self.selected_id().await?;
        self.cache.get(id).await
    }
}
