use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};
use crate::filter::SearchFilter;
use crate::models::MeetingRecord;

pub mod memory;
pub mod postgres;
pub mod resilient;
pub mod rest;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use resilient::{FallbackCache, ResilientStore};
pub use rest::RestStore;

/// Any transport, authentication, or backend-side failure. Carries no retry
/// guidance; recovery policy lives in [`ResilientStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("authentication rejected by backend (HTTP {0})")]
    Unauthorized(u16),
    #[error("backend returned HTTP {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
    #[error("record id already exists: {0}")]
    DuplicateId(String),
}

/// Uniform persistence contract for meeting records. Backends must surface
/// their own failures as [`StoreError`]; coercing a failure into an empty
/// result set is the resilience layer's decision, never the adapter's.
#[async_trait]
pub trait MeetingStore: Send + Sync {
    async fn insert(&self, record: MeetingRecord) -> Result<MeetingRecord, StoreError>;

    /// `Ok(None)` means the id does not exist; that is a valid outcome, not
    /// an error.
    async fn get_by_id(&self, id: &str) -> Result<Option<MeetingRecord>, StoreError>;

    /// All records ordered by `meeting_date` (descending when asked), with
    /// `id` ascending as the tie-break.
    async fn list(&self, descending: bool) -> Result<Vec<MeetingRecord>, StoreError>;

    /// Records matching `filter`, ordered `meeting_date` descending. Native
    /// evaluation must agree with [`SearchFilter::matches`].
    async fn list_filtered(&self, filter: &SearchFilter)
        -> Result<Vec<MeetingRecord>, StoreError>;
}

/// Builds the configured backend. Backends are swapped by configuration, not
/// by code paths in the callers.
pub async fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn MeetingStore>> {
    match config.backend {
        StoreBackend::Postgres => {
            let store = PostgresStore::connect(&config.database_url)?;
            if let Err(e) = store.run_migrations().await {
                tracing::warn!("Migrations did not run, continuing degraded: {}", e);
            }
            Ok(Arc::new(store))
        }
        StoreBackend::Rest => Ok(Arc::new(RestStore::new(
            &config.rest_base_url,
            config.rest_api_key.as_deref(),
        ))),
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
