use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::filter::{sort_by_date, SearchFilter};
use crate::models::MeetingRecord;
use crate::store::{MeetingStore, StoreError};

/// In-process store, used for standalone runs and tests. Evaluates filters
/// with the local predicate, so it doubles as the reference the native
/// backends must agree with.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<MeetingRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<MeetingRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl MeetingStore for MemoryStore {
    async fn insert(&self, record: MeetingRecord) -> Result<MeetingRecord, StoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId(record.id));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<MeetingRecord>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, descending: bool) -> Result<Vec<MeetingRecord>, StoreError> {
        let mut records = self.records.read().await.clone();
        sort_by_date(&mut records, descending);
        Ok(records)
    }

    async fn list_filtered(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<MeetingRecord>, StoreError> {
        let mut records: Vec<MeetingRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        sort_by_date(&mut records, true);
        Ok(records)
    }
}
