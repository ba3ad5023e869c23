//! List command implementation

use anyhow::{anyhow, Result};
use shelfscan_core::store::LibraryStore;
use shelfscan_core::{ReadingStatus, RecordFilter};

/// List the records of one owner's library
pub async fn list(
    data_dir: &str,
    owner: &str,
    status: Option<&str>,
    search: Option<String>,
    json: bool,
) -> Result<()> {
    let status = status
        .map(|raw| raw.parse::<ReadingStatus>())
        .transpose()
        .map_err(|e| anyhow!(e))?;

    let store = super::open_store(data_dir).await?;
    let filter = RecordFilter {
        status,
        search,
        ..RecordFilter::default()
    };
    let records = store.query(owner, &filter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    for record in &records {
        println!(
            "{}  {} by {} (ISBN {}) [{}]",
            record.id,
            record.title,
            record.author,
            record.isbn,
            record.status.as_str()
        );
    }
    println!("{} record(s)", records.len());

    Ok(())
}
