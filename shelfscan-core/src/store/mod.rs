//! Library record storage
//!
//! The store is the final arbiter of the (owner_id, isbn) uniqueness
//! invariant: `insert` must reject a duplicate pair with
//! `StoreError::ConstraintViolation` even when the pipeline's duplicate
//! guard missed a concurrent ingestion.

mod json_file;
mod memory;

pub use json_file::JsonFileLibraryStore;
pub use memory::MemoryLibraryStore;

use crate::error::StoreError;
use crate::types::{LibraryRecord, NewRecord, RecordFilter, RecordUpdate};
use async_trait::async_trait;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable keyed storage for library records
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Records belonging to an owner, narrowed by the filter,
    /// ordered by title
    async fn query(&self, owner_id: &str, filter: &RecordFilter)
        -> StoreResult<Vec<LibraryRecord>>;

    /// Fetch a single record by id
    async fn get(&self, id: Uuid) -> StoreResult<LibraryRecord>;

    /// Persist a new record, assigning its id and creation timestamp
    async fn insert(&self, record: NewRecord) -> StoreResult<LibraryRecord>;

    /// Apply a partial update to an existing record
    async fn update(&self, id: Uuid, fields: RecordUpdate) -> StoreResult<LibraryRecord>;

    /// Remove a record
    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}
