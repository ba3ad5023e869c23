//! Status command implementation

use anyhow::{anyhow, Context, Result};
use shelfscan_core::store::LibraryStore;
use shelfscan_core::{ReadingStatus, RecordUpdate};
use uuid::Uuid;

/// Transition a record to a new reading status
pub async fn status(data_dir: &str, id: &str, set: &str) -> Result<()> {
    let id = Uuid::parse_str(id).context("Record id must be a UUID")?;
    let status = set.parse::<ReadingStatus>().map_err(|e| anyhow!(e))?;

    let store = super::open_store(data_dir).await?;
    let record = store
        .update(
            id,
            RecordUpdate {
                status: Some(status),
            },
        )
        .await?;

    println!(
        "\"{}\" is now marked {}",
        record.title,
        record.status.as_str()
    );

    Ok(())
}
