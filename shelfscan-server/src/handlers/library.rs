//! Library collection handlers: list, detail, status update, delete

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shelfscan_core::{LibraryRecord, ReadingStatus, RecordFilter, RecordUpdate, StoreError};
use uuid::Uuid;

fn store_error_status(e: &StoreError) -> StatusCode {
    match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Query parameters for listing records
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Owner whose collection is listed
    pub owner_id: String,

    /// Substring search over title, author, and ISBN
    pub search: Option<String>,

    /// Reading status filter
    pub status: Option<String>,
}

/// List response
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub records: Vec<LibraryRecord>,
    pub total: usize,
}

/// List an owner's records, optionally filtered
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>, (StatusCode, String)> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(
            raw.parse::<ReadingStatus>()
                .map_err(|e| (StatusCode::BAD_REQUEST, e))?,
        ),
        None => None,
    };

    let filter = RecordFilter {
        search: query.search,
        status,
        ..RecordFilter::default()
    };

    let records = state
        .store
        .query(&query.owner_id, &filter)
        .await
        .map_err(|e| (store_error_status(&e), e.to_string()))?;

    Ok(Json(ListResponse {
        total: records.len(),
        records,
    }))
}

/// Get a single record
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LibraryRecord>, (StatusCode, String)> {
    let id = Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "record id must be a UUID".to_string(),
        )
    })?;

    let record = state
        .store
        .get(id)
        .await
        .map_err(|e| (store_error_status(&e), e.to_string()))?;
    Ok(Json(record))
}

/// Request body for a status transition
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ReadingStatus,
}

/// Set a record's reading status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<LibraryRecord>, (StatusCode, String)> {
    let id = Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "record id must be a UUID".to_string(),
        )
    })?;

    let record = state
        .store
        .update(
            id,
            RecordUpdate {
                status: Some(body.status),
            },
        )
        .await
        .map_err(|e| (store_error_status(&e), e.to_string()))?;

    state.broadcast(ServerEvent::StatusChanged {
        id: record.id.to_string(),
        status: record.status.as_str().to_string(),
    });

    Ok(Json(record))
}

/// Delete a record
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let id = Uuid::parse_str(&id).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "record id must be a UUID".to_string(),
        )
    })?;

    state
        .store
        .delete(id)
        .await
        .map_err(|e| (store_error_status(&e), e.to_string()))?;

    state.broadcast(ServerEvent::RecordDeleted { id: id.to_string() });

    Ok(StatusCode::NO_CONTENT)
}
