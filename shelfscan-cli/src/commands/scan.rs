//! Scan command implementation

use anyhow::{bail, Context, Result};
use shelfscan_core::barcode::EanImageDecoder;
use shelfscan_core::ScanPipeline;
use std::sync::Arc;

/// Run the ingestion pipeline for one image file
pub async fn scan(data_dir: &str, image_path: &str, owner: &str) -> Result<()> {
    let image = tokio::fs::read(image_path)
        .await
        .with_context(|| format!("Failed to read image file: {}", image_path))?;
    tracing::debug!(path = %image_path, bytes = image.len(), "Read image file");

    let store = Arc::new(super::open_store(data_dir).await?);
    let resolver = Arc::new(super::catalog_client()?);
    let pipeline = ScanPipeline::new(Arc::new(EanImageDecoder::new()), resolver, store);

    let outcome = pipeline.ingest(owner, image).await;
    tracing::info!(code = outcome.code(), "Scan finished");
    println!("{}", outcome.message());

    match outcome.record() {
        Some(record) => {
            println!("  id:     {}", record.id);
            println!("  title:  {}", record.title);
            println!("  author: {}", record.author);
            println!("  isbn:   {}", record.isbn);
            Ok(())
        }
        None => bail!("scan ended with outcome: {}", outcome.code()),
    }
}
