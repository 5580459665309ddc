pub mod config;
pub mod filter;
pub mod models;
pub mod stats;
pub mod store;
pub mod utils;
pub mod validate;

pub use config::StoreConfig;
pub use filter::SearchFilter;
pub use models::{MeetingRecord, MeetingStats};
pub use store::{build_store, FallbackCache, MeetingStore, ResilientStore, StoreError};
pub use validate::{validate_payload, ValidationError};
