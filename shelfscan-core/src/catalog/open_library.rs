//! OpenLibrary Books API client

use super::{validate_isbn, CatalogResolver};
use crate::error::CatalogError;
use crate::types::BookMetadata;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

const OPEN_LIBRARY_BASE_URL: &str = "https://openlibrary.org";
const USER_AGENT: &str = concat!("shelfscan/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// One entry of the `jscmd=data` response body
#[derive(Debug, Deserialize)]
struct OpenLibraryBook {
    title: Option<String>,
    authors: Option<Vec<OpenLibraryAuthor>>,
    cover: Option<OpenLibraryCover>,
}

#[derive(Debug, Deserialize)]
struct OpenLibraryAuthor {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OpenLibraryCover {
    medium: Option<String>,
}

impl OpenLibraryBook {
    /// Apply the placeholder defaults once, at the boundary
    fn into_metadata(self, isbn: &str) -> BookMetadata {
        let author = match self.authors {
            Some(authors) if !authors.is_empty() => authors
                .into_iter()
                .map(|a| a.name)
                .collect::<Vec<_>>()
                .join(", "),
            _ => BookMetadata::UNKNOWN_AUTHOR.to_string(),
        };

        BookMetadata {
            title: self
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| BookMetadata::UNKNOWN_TITLE.to_string()),
            author,
            isbn: isbn.to_string(),
            cover_url: self.cover.and_then(|c| c.medium).unwrap_or_default(),
        }
    }
}

/// Resolver backed by the OpenLibrary Books API
pub struct OpenLibraryClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryClient {
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base_url(OPEN_LIBRARY_BASE_URL)
    }

    /// Point the client at a different catalog endpoint (tests, mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl CatalogResolver for OpenLibraryClient {
    async fn resolve(&self, isbn: &str) -> Result<BookMetadata, CatalogError> {
        validate_isbn(isbn)?;

        let url = format!(
            "{}/api/books?bibkeys=ISBN:{}&format=json&jscmd=data",
            self.base_url, isbn
        );

        tracing::debug!(isbn = %isbn, url = %url, "Querying OpenLibrary");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Unavailable(format!(
                "catalog returned HTTP {}",
                status.as_u16()
            )));
        }

        // Body is an object keyed by "ISBN:{isbn}"; a missing key on a
        // 200 response is the catalog's authoritative "no such book"
        let mut body: HashMap<String, OpenLibraryBook> = response
            .json()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        let book = body
            .remove(&format!("ISBN:{}", isbn))
            .ok_or_else(|| CatalogError::NotFound(isbn.to_string()))?;

        let metadata = book.into_metadata(isbn);
        tracing::info!(isbn = %isbn, title = %metadata.title, "Resolved book from catalog");
        Ok(metadata)
    }
}
