use finboard_core::Result;
use finboard_core::analysis::AnalysisRecord;
use finboard_core::storage::{KeyValueStore, RECORDS_KEY};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Newest-first collection of analysis records, persisted as one JSON array.
///
/// Append-only for the process lifetime. The write lock is held across the
/// in-memory update and the persisted write, so readers never observe a
/// collection that differs from storage.
pub struct RecordCache {
    store: Arc<dyn KeyValueStore>,
    records: RwLock<Vec<AnalysisRecord>>,
}

impl RecordCache {
    /// Creates an empty cache. Call [`RecordCache::load_from_storage`] to rehydrate.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the in-memory collection with the persisted snapshot.
    ///
    /// Malformed or unreadable snapshots are logged and treated as empty.
    /// Returns the number of records loaded.
    pub async fn load_from_storage(&self) -> usize {
        let loaded = match self.store.get(RECORDS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<AnalysisRecord>>(&raw) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(
                        "[RecordCache] Ignoring malformed '{}' snapshot: {}",
                        RECORDS_KEY,
                        e
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("[RecordCache] Could not read '{}': {}", RECORDS_KEY, e);
                Vec::new()
            }
        };

        let count = loaded.len();
        *self.records.write().await = loaded;
        tracing::debug!("[RecordCache] Loaded {} records", count);
        count
    }

    /// Prepends `record` and persists the full collection.
    ///
    /// If persisting fails the in-memory collection is left as it was.
    pub async fn add(&self, record: AnalysisRecord) -> Result<()> {
        let mut records = self.records.write().await;

        let mut updated = Vec::with_capacity(records.len() + 1);
        updated.push(record);
        updated.extend(records.iter().cloned());

        let snapshot = serde_json::to_string(&updated)?;
        self.store.set(RECORDS_KEY, &snapshot)?;

        *records = updated;
        tracing::debug!("[RecordCache] Added record, {} total", records.len());
        Ok(())
    }

    /// Current collection, newest first.
    pub async fn list(&self) -> Vec<AnalysisRecord> {
        self.records.read().await.clone()
    }

    pub async fn get(&self, id: i64) -> Option<AnalysisRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub async fn first(&self) -> Option<AnalysisRecord> {
        self.records.read().await.first().cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
