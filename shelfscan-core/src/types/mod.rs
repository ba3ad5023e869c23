//! Core data types for the ingestion pipeline and the library store

mod metadata;
mod record;

pub use metadata::{normalize_isbn, BookMetadata, DecodedCode};
pub use record::{LibraryRecord, NewRecord, ReadingStatus, RecordFilter, RecordUpdate};
