//! Server-Sent Events handler for real-time updates

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// SSE endpoint for real-time updates
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| {
        match result {
            Ok(event) => {
                let (event_type, data) = match event {
                    ServerEvent::RecordAdded {
                        id,
                        owner_id,
                        title,
                    } => (
                        "record_added",
                        serde_json::json!({ "id": id, "owner_id": owner_id, "title": title })
                            .to_string(),
                    ),
                    ServerEvent::StatusChanged { id, status } => (
                        "status_changed",
                        serde_json::json!({ "id": id, "status": status }).to_string(),
                    ),
                    ServerEvent::RecordDeleted { id } => (
                        "record_deleted",
                        serde_json::json!({ "id": id }).to_string(),
                    ),
                };

                Some(Ok(Event::default().event(event_type).data(data)))
            }
            Err(_) => None, // Lagged, skip
        }
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}
