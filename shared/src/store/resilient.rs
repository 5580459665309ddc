use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::filter::{sort_by_date, SearchFilter};
use crate::models::MeetingRecord;
use crate::store::seed::seed_records;
use crate::store::{MeetingStore, StoreError};

/// Process-local record set served when the backing store is unreachable.
///
/// Owned by whoever constructs the [`ResilientStore`] rather than living in
/// a module-level static, so tests get a fresh instance per case. The set
/// only grows; there is no eviction and no persistence across restarts.
pub struct FallbackCache {
    records: RwLock<Vec<MeetingRecord>>,
}

impl FallbackCache {
    pub fn empty() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Starts from the fixed sample set, matching what the dashboard shows
    /// before any webhook has fired.
    pub fn seeded() -> Self {
        Self {
            records: RwLock::new(seed_records()),
        }
    }

    pub async fn push(&self, record: MeetingRecord) {
        let mut records = self.records.write().await;
        if !records.iter().any(|r| r.id == record.id) {
            records.push(record);
        }
    }

    pub async fn get(&self, id: &str) -> Option<MeetingRecord> {
        self.records.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub async fn list(&self, descending: bool) -> Vec<MeetingRecord> {
        let mut records = self.records.read().await.clone();
        sort_by_date(&mut records, descending);
        records
    }

    pub async fn list_filtered(&self, filter: &SearchFilter) -> Vec<MeetingRecord> {
        let mut records: Vec<MeetingRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        sort_by_date(&mut records, true);
        records
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

/// Wraps a [`MeetingStore`] so the query surface stays available when the
/// backend is degraded: reads fall back to the local cache instead of
/// erroring, and a failed insert is absorbed into the cache and still
/// reported as success. The trade-off is staleness and the loss of
/// cross-instance consistency, accepted by design.
pub struct ResilientStore {
    inner: Arc<dyn MeetingStore>,
    cache: FallbackCache,
}

impl ResilientStore {
    pub fn new(inner: Arc<dyn MeetingStore>, cache: FallbackCache) -> Self {
        Self { inner, cache }
    }

    /// Persists the record, to the backend when possible, to the local cache
    /// otherwise. From the caller's perspective the write always succeeds;
    /// locally-absorbed records are visible to later reads within this
    /// process lifetime only.
    pub async fn insert(&self, record: MeetingRecord) -> MeetingRecord {
        match self.inner.insert(record.clone()).await {
            Ok(stored) => {
                // Mirror successful writes so degraded reads stay coherent.
                self.cache.push(stored.clone()).await;
                stored
            }
            Err(e) => {
                warn!("Store insert failed, absorbing record locally: {}", e);
                self.cache.push(record.clone()).await;
                record
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Option<MeetingRecord> {
        match self.inner.get_by_id(id).await {
            Ok(Some(record)) => Some(record),
            // A backend miss may still be a locally-absorbed record.
            Ok(None) => self.cache.get(id).await,
            Err(e) => {
                warn!("Store lookup failed, serving from fallback set: {}", e);
                self.cache.get(id).await
            }
        }
    }

    pub async fn list(&self, descending: bool) -> Vec<MeetingRecord> {
        match self.inner.list(descending).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Store list failed, serving from fallback set: {}", e);
                self.cache.list(descending).await
            }
        }
    }

    pub async fn search(&self, filter: &SearchFilter) -> Vec<MeetingRecord> {
        match self.inner.list_filtered(filter).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Store search failed, filtering fallback set: {}", e);
                self.cache.list_filtered(filter).await
            }
        }
    }
}
