//! Error types for Shelfscan Core

use thiserror::Error;

/// Result type alias using ShelfscanError
pub type Result<T> = std::result::Result<T, ShelfscanError>;

/// Top-level error type for all Shelfscan operations
#[derive(Debug, Error)]
pub enum ShelfscanError {
    #[error("Barcode error: {0}")]
    Barcode(#[from] BarcodeError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while turning an image into a barcode
///
/// The absence of a barcode is not an error; `decode` reports it as
/// `Ok(None)`. Only an undecodable payload is a fault.
#[derive(Debug, Error)]
pub enum BarcodeError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

/// Errors that occur while resolving an ISBN against the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Rejected before any network call is made
    #[error("Invalid ISBN: {0:?}")]
    InvalidIsbn(String),

    /// The catalog was reachable and authoritative about the absence
    #[error("No catalog entry for ISBN {0}")]
    NotFound(String),

    /// Network failure, non-200 status, or a malformed response body
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// Errors that occur during library store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The (owner_id, isbn) uniqueness constraint was violated
    #[error("Owner {owner_id} already holds a record for ISBN {isbn}")]
    ConstraintViolation { owner_id: String, isbn: String },

    #[error("Backend error: {0}")]
    Backend(String),
}
