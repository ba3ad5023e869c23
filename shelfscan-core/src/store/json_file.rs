//! JSON-file-backed library store
//!
//! Keeps the full record map in memory and rewrites the backing file
//! after every mutation, using a temp-file-then-rename sequence so a
//! crash never leaves a partial file behind.

use super::{LibraryStore, StoreResult};
use crate::error::StoreError;
use crate::types::{LibraryRecord, NewRecord, RecordFilter, RecordUpdate};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Library store persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFileLibraryStore {
    path: PathBuf,
    records: RwLock<HashMap<Uuid, LibraryRecord>>,
}

impl JsonFileLibraryStore {
    /// Open a store at the given file path, creating parent directories.
    /// A missing file is an empty library.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Backend(e.to_string()))?;
        }

        let records = match tokio::fs::read_to_string(&path).await {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| StoreError::Backend(format!("corrupt library file: {}", e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Backend(e.to_string())),
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the map to disk atomically (temp file, then rename)
    async fn save(&self, records: &HashMap<Uuid, LibraryRecord>) -> StoreResult<()> {
        let data = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &data)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl LibraryStore for JsonFileLibraryStore {
    async fn query(
        &self,
        owner_id: &str,
        filter: &RecordFilter,
    ) -> StoreResult<Vec<LibraryRecord>> {
        let records = self.records.read().await;
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
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, record: NewRecord) -> StoreResult<LibraryRecord> {
        // Write lock held across check, insert, and save so concurrent
        // inserts of the same (owner, isbn) cannot interleave
        let mut records = self.records.write().await;

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

        if let Err(e) = self.save(&records).await {
            records.remove(&persisted.id);
            return Err(e);
        }
        Ok(persisted)
    }

    async fn update(&self, id: Uuid, fields: RecordUpdate) -> StoreResult<LibraryRecord> {
        let mut records = self.records.write().await;
        let previous = records
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let mut updated = previous.clone();
        if let Some(status) = fields.status {
            updated.status = status;
        }
        records.insert(id, updated.clone());

        if let Err(e) = self.save(&records).await {
            records.insert(id, previous);
            return Err(e);
        }
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut records = self.records.write().await;
        let removed = records
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Err(e) = self.save(&records).await {
            records.insert(id, removed);
            return Err(e);
        }
        Ok(())
    }
}
