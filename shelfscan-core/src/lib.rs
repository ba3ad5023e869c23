//! Shelfscan Core Library
//!
//! This crate provides the barcode-to-library ingestion pipeline for the
//! Shelfscan book tracking system: an image is decoded into an ISBN, the
//! ISBN is resolved against an external catalog, a duplicate check runs
//! against the owner's collection, and the resulting record is persisted
//! with an initial reading status.

pub mod barcode;
pub mod catalog;
pub mod dedup;
pub mod error;
pub mod ingest;
pub mod store;
pub mod types;

pub use error::{BarcodeError, CatalogError, Result, ShelfscanError, StoreError};
pub use ingest::{ScanOutcome, ScanPipeline, StageTimeouts};
pub use types::{
    normalize_isbn, BookMetadata, DecodedCode, LibraryRecord, NewRecord, ReadingStatus,
    RecordFilter, RecordUpdate,
};
