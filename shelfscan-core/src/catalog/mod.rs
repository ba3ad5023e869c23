//! Catalog resolution: ISBN to book metadata

mod open_library;

pub use open_library::OpenLibraryClient;

use crate::error::CatalogError;
use crate::types::BookMetadata;
use async_trait::async_trait;

/// Trait for resolving an ISBN against an external book catalog
///
/// `CatalogError::NotFound` is a successful-but-empty outcome: the
/// catalog was reachable and authoritative about the absence. Resolvers
/// perform no retries; that decision belongs to the caller.
#[async_trait]
pub trait CatalogResolver: Send + Sync {
    async fn resolve(&self, isbn: &str) -> Result<BookMetadata, CatalogError>;
}

/// Reject an ISBN before any network call is issued
///
/// The pipeline must not perform a lookup for uncertain input.
pub fn validate_isbn(isbn: &str) -> Result<(), CatalogError> {
    if isbn.is_empty() || !isbn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CatalogError::InvalidIsbn(isbn.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_numeric() {
        assert!(validate_isbn("9780141439518").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_and_non_numeric() {
        for bad in ["", "978-0141439518", "97801abc39518", " 9780141439518"] {
            assert!(
                matches!(validate_isbn(bad), Err(CatalogError::InvalidIsbn(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }
}
