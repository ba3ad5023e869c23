//! In-memory library store (for tests and ephemeral use)

use super::{LibraryStore, StoreResult};
use crate::error::StoreError;
use crate::types::{LibraryRecord, NewRecord, RecordFilter, RecordUpdate};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Library store backed by a process-local map
#[derive(Default)]
pub struct MemoryLibraryStore {
    records: RwLock<HashMap<Uuid, LibraryRecord>>,
}

impl MemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LibraryStore for MemoryLibraryStore {
    async fn query(
        &self,
        owner_id: &str,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<LibraryRecord>> {
        let records = self.records.read().unwrap();
        let mut matches: Vec<LibraryRecord> = records
            .values()
            .filter(|r| r.owner_id == owner_id && filter.matches(r))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(matches)
    }

    async fn get(&self, id: Uuid) -> StoreResult<LibraryRecord> {
        self.records
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, record: NewRecord) -> StoreResult<LibraryRecord> {
        let mut records = self.records.write().unwrap();

        // Uniqueness check and insert happen under one lock
        if records
            .values()
            .any(|r| r.owner_id == record.owner_id && r.isbn == record.isbn)
        {
            return Err(StoreError::ConstraintViolation {
                owner_id: record.owner_id,
                isbn: record.isbn,
            });
        }

        let persisted = LibraryRecord {
            id: Uuid::new_v4(),
            owner_id: record.owner_id,
            title: record.title,
            author: record.author,
            isbn: record.isbn,
            cover_url: record.cover_url,
            status: record.status,
            created_at: chrono::Utc::now(),
        };
        records.insert(persisted.id, persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, id: Uuid, fields: RecordUpdate) -> StoreResult<LibraryRecord> {
        let mut records = self.records.write().unwrap();
        let record = records
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(status) = fields.status {
            record.status = status;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.records
            .write()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
