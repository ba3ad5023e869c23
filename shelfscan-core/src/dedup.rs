//! Duplicate detection ahead of the store write
//!
//! The guard is an optimization: it catches duplicates before metadata
//! is thrown away on an insert that was always going to fail. The store
//! itself re-checks the (owner_id, isbn) constraint on insert, so two
//! concurrent ingestions racing past the guard still cannot produce two
//! records.

use crate::store::{LibraryStore, StoreResult};
use crate::types::RecordFilter;

/// Checks whether an ISBN is already in an owner's collection
pub struct DuplicateGuard<'a> {
    store: &'a dyn LibraryStore,
}

impl<'a> DuplicateGuard<'a> {
    pub fn new(store: &'a dyn LibraryStore) -> Self {
        Self { store }
    }

    /// True when the owner already holds a record with this exact ISBN.
    /// Expects the normalized form; comparison is string equality.
    pub async fn exists(&self, owner_id: &str, isbn: &str) -> StoreResult<bool> {
        let matches = self
            .store
            .query(owner_id, &RecordFilter::by_isbn(isbn))
            .await?;
        Ok(!matches.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryLibraryStore;
    use crate::types::{NewRecord, ReadingStatus};

    #[tokio::test]
    async fn test_exists_only_for_matching_owner_and_isbn() {
        let store = MemoryLibraryStore::new();
        store
            .insert(NewRecord {
                owner_id: "u1".to_string(),
                title: "Pride and Prejudice".to_string(),
                author: "Jane Austen".to_string(),
                isbn: "9780141439518".to_string(),
                cover_url: String::new(),
                status: ReadingStatus::NotStarted,
            })
            .await
            .unwrap();

        let guard = DuplicateGuard::new(&store);
        assert!(guard.exists("u1", "9780141439518").await.unwrap());
        assert!(!guard.exists("u1", "9780441013593").await.unwrap());
        assert!(!guard.exists("u2", "9780141439518").await.unwrap());
    }
}
