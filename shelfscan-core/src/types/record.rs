//! The persisted library record and its store-facing companions

use super::BookMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reading status of a library record
///
/// Set to `NotStarted` when the ingestion pipeline creates the record;
/// later transitions go through `LibraryStore::update`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ReadingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingStatus::NotStarted => "not_started",
            ReadingStatus::InProgress => "in_progress",
            ReadingStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(ReadingStatus::NotStarted),
            "in_progress" => Ok(ReadingStatus::InProgress),
            "completed" => Ok(ReadingStatus::Completed),
            other => Err(format!("unknown reading status: {}", other)),
        }
    }
}

/// A book in a user's library
///
/// Invariant: no two records share the same (owner_id, isbn). The store
/// enforces this on insert; the pipeline's duplicate guard is an
/// optimization in front of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryRecord {
    /// Assigned by the store at insert time
    pub id: Uuid,

    /// The user who owns this record
    pub owner_id: String,

    pub title: String,
    pub author: String,
    pub isbn: String,

    /// Cover image URL, empty when unknown
    pub cover_url: String,

    pub status: ReadingStatus,

    /// Assigned by the store at insert time
    pub created_at: DateTime<Utc>,
}

/// A record as handed to the store for insertion
///
/// `id` and `created_at` do not exist yet; the store assigns both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRecord {
    pub owner_id: String,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub cover_url: String,
    pub status: ReadingStatus,
}

impl NewRecord {
    /// Build the record the pipeline persists for resolved metadata
    pub fn from_metadata(owner_id: impl Into<String>, metadata: &BookMetadata) -> Self {
        Self {
            owner_id: owner_id.into(),
            title: metadata.title.clone(),
            author: metadata.author.clone(),
            isbn: metadata.isbn.clone(),
            cover_url: metadata.cover_url.clone(),
            status: ReadingStatus::NotStarted,
        }
    }
}

/// Filter for `LibraryStore::query`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Exact ISBN match (normalized form)
    pub isbn: Option<String>,

    /// Reading status match
    pub status: Option<ReadingStatus>,

    /// Case-insensitive substring match over title, author, and ISBN
    pub search: Option<String>,
}

impl RecordFilter {
    /// Filter on an exact ISBN, as the duplicate guard queries
    pub fn by_isbn(isbn: impl Into<String>) -> Self {
        Self {
            isbn: Some(isbn.into()),
            ..Self::default()
        }
    }

    /// Whether a record passes this filter
    pub fn matches(&self, record: &LibraryRecord) -> bool {
        if let Some(ref isbn) = self.isbn {
            if record.isbn != *isbn {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !record.title.to_lowercase().contains(&needle)
                && !record.author.to_lowercase().contains(&needle)
                && !record.isbn.contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Fields updatable through `LibraryStore::update`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordUpdate {
    pub status: Option<ReadingStatus>,
}
