//! Scan handler: multipart image upload into the ingestion pipeline

use crate::state::{AppState, ServerEvent};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use shelfscan_core::{LibraryRecord, ScanOutcome};

/// Response body for every scan outcome
///
/// `code` is stable for programmatic handling; `record` is present only
/// on success. The HTTP status alone is not the contract.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<LibraryRecord>,
}

/// HTTP status for a terminal pipeline outcome
fn status_for(outcome: &ScanOutcome) -> StatusCode {
    match outcome {
        ScanOutcome::Persisted(_) => StatusCode::CREATED,
        ScanOutcome::InvalidImage { .. } => StatusCode::BAD_REQUEST,
        ScanOutcome::NoBarcode => StatusCode::UNPROCESSABLE_ENTITY,
        ScanOutcome::InvalidIsbn { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ScanOutcome::NotInCatalog { .. } => StatusCode::NOT_FOUND,
        ScanOutcome::Duplicate { .. } => StatusCode::CONFLICT,
        ScanOutcome::LookupFailed { .. } => StatusCode::BAD_GATEWAY,
        ScanOutcome::PersistFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Ingest a scanned barcode image
///
/// Multipart form with an `owner_id` text field and an `image` file
/// field. The owner is always an explicit parameter; the server holds
/// no session state.
pub async fn scan(
    State(state): State<AppState>,
    mut multipart: axum_extra::extract::Multipart,
) -> Result<(StatusCode, Json<ScanResponse>), (StatusCode, String)> {
    let mut owner_id: Option<String> = None;
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "owner_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                owner_id = Some(text);
            }
            "image" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                image = Some(data.to_vec());
            }
            _ => {}
        }
    }

    let owner_id = owner_id
        .filter(|o| !o.is_empty())
        .ok_or((StatusCode::BAD_REQUEST, "owner_id is required".to_string()))?;
    let image = image.ok_or((
        StatusCode::BAD_REQUEST,
        "image field is required".to_string(),
    ))?;

    let outcome = state.pipeline.ingest(&owner_id, image).await;

    if let ScanOutcome::Persisted(record) = &outcome {
        state.broadcast(ServerEvent::RecordAdded {
            id: record.id.to_string(),
            owner_id: record.owner_id.clone(),
            title: record.title.clone(),
        });
    }

    let status = status_for(&outcome);
    let message = outcome.message();
    let response = ScanResponse {
        code: outcome.code(),
        message,
        record: match outcome {
            ScanOutcome::Persisted(record) => Some(record),
            _ => None,
        },
    };
    Ok((status, Json(response)))
}
