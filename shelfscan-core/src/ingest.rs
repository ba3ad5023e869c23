//! The ingestion pipeline: image to persisted library record
//!
//! One invocation per user scan. The stages run strictly in order —
//! decode, resolve, duplicate check, insert — and every stage ends the
//! pipeline with exactly one terminal outcome. Dropping the returned
//! future abandons any in-flight call; nothing is persisted until the
//! final insert completes.

use crate::barcode::BarcodeDecoder;
use crate::catalog::{self, CatalogResolver};
use crate::dedup::DuplicateGuard;
use crate::error::{BarcodeError, CatalogError, StoreError};
use crate::store::LibraryStore;
use crate::types::{normalize_isbn, LibraryRecord, NewRecord};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Upper bounds for each external-call stage
///
/// A stage that exceeds its bound resolves to that stage's failure
/// outcome; the pipeline never hangs.
#[derive(Debug, Clone, Copy)]
pub struct StageTimeouts {
    /// Image decode (CPU-bound, runs on a blocking thread)
    pub decode: Duration,
    /// Catalog lookup over the network
    pub lookup: Duration,
    /// Each store operation (query and insert separately)
    pub store: Duration,
}

impl Default for StageTimeouts {
    fn default() -> Self {
        Self {
            decode: Duration::from_secs(10),
            lookup: Duration::from_secs(20),
            store: Duration::from_secs(5),
        }
    }
}

/// Terminal outcome of one pipeline invocation
///
/// The caller must handle these exhaustively; only `Persisted` is
/// success. Each variant maps to one stable code and one user-facing
/// message.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The record was written; the pipeline's only side effect
    Persisted(LibraryRecord),

    /// The payload was not a decodable image
    InvalidImage { detail: String },

    /// The image decoded fine but carries no recognizable barcode
    NoBarcode,

    /// The decoded code did not normalize to a plausible ISBN
    InvalidIsbn { isbn: String },

    /// The catalog was reachable and has no entry for this ISBN
    NotInCatalog { isbn: String },

    /// The catalog could not be reached or answered garbage; retryable
    LookupFailed { detail: String },

    /// The owner already holds this ISBN
    Duplicate { isbn: String },

    /// The store could not be queried or written; retryable
    PersistFailed { detail: String },
}

impl ScanOutcome {
    /// Stable code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            ScanOutcome::Persisted(_) => "persisted",
            ScanOutcome::InvalidImage { .. } => "invalid_image",
            ScanOutcome::NoBarcode => "no_barcode",
            ScanOutcome::InvalidIsbn { .. } => "invalid_isbn",
            ScanOutcome::NotInCatalog { .. } => "not_in_catalog",
            ScanOutcome::LookupFailed { .. } => "lookup_failed",
            ScanOutcome::Duplicate { .. } => "duplicate",
            ScanOutcome::PersistFailed { .. } => "persist_failed",
        }
    }

    /// The one user-facing message for this outcome
    pub fn message(&self) -> String {
        match self {
            ScanOutcome::Persisted(record) => {
                format!("\"{}\" was added to your library.", record.title)
            }
            ScanOutcome::InvalidImage { .. } => "That image could not be read.".to_string(),
            ScanOutcome::NoBarcode => "No barcode detected. Try another image.".to_string(),
            ScanOutcome::InvalidIsbn { .. } => "Invalid ISBN detected.".to_string(),
            ScanOutcome::NotInCatalog { .. } => "Book not found in the catalog.".to_string(),
            ScanOutcome::LookupFailed { .. } => "Failed to retrieve book details.".to_string(),
            ScanOutcome::Duplicate { .. } => "Book already exists in your library.".to_string(),
            ScanOutcome::PersistFailed { .. } => "Error saving book to your library.".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScanOutcome::Persisted(_))
    }

    pub fn record(&self) -> Option<&LibraryRecord> {
        match self {
            ScanOutcome::Persisted(record) => Some(record),
            _ => None,
        }
    }
}

/// Composes decoder, resolver, guard, and store into one pipeline
pub struct ScanPipeline {
    decoder: Arc<dyn BarcodeDecoder>,
    resolver: Arc<dyn CatalogResolver>,
    store: Arc<dyn LibraryStore>,
    timeouts: StageTimeouts,
}

impl ScanPipeline {
    pub fn new(
        decoder: Arc<dyn BarcodeDecoder>,
        resolver: Arc<dyn CatalogResolver>,
        store: Arc<dyn LibraryStore>,
    ) -> Self {
        Self {
            decoder,
            resolver,
            store,
            timeouts: StageTimeouts::default(),
        }
    }

    pub fn with_timeouts(mut self, timeouts: StageTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Run one ingestion for an owner-supplied image
    pub async fn ingest(&self, owner_id: &str, image: Vec<u8>) -> ScanOutcome {
        // Decoding. CPU-bound, so it goes to a blocking thread; the
        // timeout discards the result rather than interrupting the task.
        let decoder = Arc::clone(&self.decoder);
        let decode = tokio::task::spawn_blocking(move || decoder.decode(&image));
        let code = match timeout(self.timeouts.decode, decode).await {
            Err(_) => {
                return ScanOutcome::InvalidImage {
                    detail: "image decode timed out".to_string(),
                }
            }
            Ok(Err(join_err)) => {
                return ScanOutcome::InvalidImage {
                    detail: join_err.to_string(),
                }
            }
            Ok(Ok(Err(BarcodeError::InvalidImage(detail)))) => {
                return ScanOutcome::InvalidImage { detail }
            }
            Ok(Ok(Ok(None))) => return ScanOutcome::NoBarcode,
            Ok(Ok(Ok(Some(code)))) => code,
        };

        // One normalization at pipeline entry; everything downstream
        // compares exact strings
        let isbn = normalize_isbn(&code.digits);
        if catalog::validate_isbn(&isbn).is_err() {
            return ScanOutcome::InvalidIsbn { isbn };
        }
        tracing::debug!(owner_id = %owner_id, isbn = %isbn, confidence = code.confidence, "Barcode decoded");

        // Resolving
        let metadata = match timeout(self.timeouts.lookup, self.resolver.resolve(&isbn)).await {
            Err(_) => {
                return ScanOutcome::LookupFailed {
                    detail: "catalog lookup timed out".to_string(),
                }
            }
            Ok(Err(CatalogError::InvalidIsbn(isbn))) => return ScanOutcome::InvalidIsbn { isbn },
            Ok(Err(CatalogError::NotFound(_))) => return ScanOutcome::NotInCatalog { isbn },
            Ok(Err(CatalogError::Unavailable(detail))) => {
                return ScanOutcome::LookupFailed { detail }
            }
            Ok(Ok(metadata)) => metadata,
        };

        // Duplicate check
        let guard = DuplicateGuard::new(self.store.as_ref());
        match timeout(self.timeouts.store, guard.exists(owner_id, &isbn)).await {
            Err(_) => {
                return ScanOutcome::PersistFailed {
                    detail: "store query timed out".to_string(),
                }
            }
            Ok(Err(e)) => {
                return ScanOutcome::PersistFailed {
                    detail: e.to_string(),
                }
            }
            Ok(Ok(true)) => return ScanOutcome::Duplicate { isbn },
            Ok(Ok(false)) => {}
        }

        // Persisting. A constraint violation here means a concurrent
        // ingestion won the race; the store is the final arbiter and the
        // outcome is still Duplicate.
        let record = NewRecord::from_metadata(owner_id, &metadata);
        match timeout(self.timeouts.store, self.store.insert(record)).await {
            Err(_) => ScanOutcome::PersistFailed {
                detail: "store write timed out".to_string(),
            },
            Ok(Err(StoreError::ConstraintViolation { .. })) => ScanOutcome::Duplicate { isbn },
            Ok(Err(e)) => ScanOutcome::PersistFailed {
                detail: e.to_string(),
            },
            Ok(Ok(record)) => {
                tracing::info!(
                    owner_id = %record.owner_id,
                    isbn = %record.isbn,
                    title = %record.title,
                    "Library record persisted"
                );
                ScanOutcome::Persisted(record)
            }
        }
    }
}
