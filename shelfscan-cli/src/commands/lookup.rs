//! Lookup command implementation

use anyhow::{Context, Result};
use shelfscan_core::catalog::{validate_isbn, CatalogResolver};
use shelfscan_core::normalize_isbn;

/// Resolve an ISBN against the catalog and print the metadata
pub async fn lookup(isbn: &str, json: bool) -> Result<()> {
    let isbn = normalize_isbn(isbn);
    validate_isbn(&isbn).context("Not a usable ISBN")?;

    let client = super::catalog_client()?;
    let metadata = client
        .resolve(&isbn)
        .await
        .with_context(|| format!("Failed to resolve ISBN {}", isbn))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        println!("Title:  {}", metadata.title);
        println!("Author: {}", metadata.author);
        println!("ISBN:   {}", metadata.isbn);
        if !metadata.cover_url.is_empty() {
            println!("Cover:  {}", metadata.cover_url);
        }
    }

    Ok(())
}
