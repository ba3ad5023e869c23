//! Application state

use anyhow::Result;
use shelfscan_core::barcode::EanImageDecoder;
use shelfscan_core::catalog::{CatalogResolver, OpenLibraryClient};
use shelfscan_core::store::{JsonFileLibraryStore, LibraryStore};
use shelfscan_core::ScanPipeline;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Library record store
    pub store: Arc<dyn LibraryStore>,

    /// The ingestion pipeline behind POST /scan
    pub pipeline: Arc<ScanPipeline>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A scan persisted a new record
    RecordAdded {
        id: String,
        owner_id: String,
        title: String,
    },

    /// A record's reading status changed
    StatusChanged { id: String, status: String },

    /// A record was deleted
    RecordDeleted { id: String },
}

impl AppState {
    /// Create state from the environment: JSON-file store under
    /// SHELFSCAN_DATA_PATH, catalog endpoint from SHELFSCAN_CATALOG_URL
    pub async fn new() -> Result<Self> {
        let data_path =
            std::env::var("SHELFSCAN_DATA_PATH").unwrap_or_else(|_| "./shelfscan_data".to_string());
        let data_path = PathBuf::from(data_path);

        let store = Arc::new(JsonFileLibraryStore::open(data_path.join("library.json")).await?);

        let resolver = match std::env::var("SHELFSCAN_CATALOG_URL") {
            Ok(url) => OpenLibraryClient::with_base_url(url)?,
            Err(_) => OpenLibraryClient::new()?,
        };

        Ok(Self::with_parts(store, Arc::new(resolver)))
    }

    /// Assemble state from explicit collaborators (tests swap these out)
    pub fn with_parts(store: Arc<dyn LibraryStore>, resolver: Arc<dyn CatalogResolver>) -> Self {
        let pipeline = Arc::new(ScanPipeline::new(
            Arc::new(EanImageDecoder::new()),
            resolver,
            store.clone(),
        ));
        let (event_tx, _) = broadcast::channel(100);

        Self {
            store,
            pipeline,
            event_tx,
        }
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
