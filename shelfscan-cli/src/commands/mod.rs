//! CLI command implementations

mod list;
mod lookup;
mod scan;
mod status;

pub use list::list;
pub use lookup::lookup;
pub use scan::scan;
pub use status::status;

use anyhow::Result;
use shelfscan_core::catalog::OpenLibraryClient;
use shelfscan_core::store::JsonFileLibraryStore;
use std::path::Path;

/// Catalog client honoring SHELFSCAN_CATALOG_URL
pub(crate) fn catalog_client() -> Result<OpenLibraryClient> {
    let client = match std::env::var("SHELFSCAN_CATALOG_URL") {
        Ok(url) => OpenLibraryClient::with_base_url(url)?,
        Err(_) => OpenLibraryClient::new()?,
    };
    Ok(client)
}

/// Open the local library file under the data directory
pub(crate) async fn open_store(data_dir: &str) -> Result<JsonFileLibraryStore> {
    let path = Path::new(data_dir).join("library.json");
    Ok(JsonFileLibraryStore::open(path).await?)
}
