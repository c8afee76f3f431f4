//! Server-Sent Events
//!
//! `/events` is a heartbeat-only stream the page uses for its connection
//! indicator. `/api/viewer/:id/events` pushes every state change of one
//! map viewer until the viewer is closed.

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use crate::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(15);

fn keep_alive() -> KeepAlive {
    KeepAlive::new().interval(HEARTBEAT_INTERVAL).text("heartbeat")
}

/// GET /events
pub async fn event_stream(
    State(_state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("New SSE client connected to site events");

    let stream = async_stream::stream! {
        yield Ok(Event::default()
            .event("ConnectionStatus")
            .data("connected"));

        loop {
            tokio::time::sleep(HEARTBEAT_INTERVAL).await;
            debug!("SSE: Sending heartbeat");
            yield Ok(Event::default().comment("heartbeat"));
        }
    };

    Sse::new(stream).keep_alive(keep_alive())
}

/// GET /api/viewer/:id/events
///
/// Sends the current view immediately, then one `ViewerState` event per
/// change. The stream ends after the closing snapshot.
pub async fn viewer_events(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let entry = state
        .viewers
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Viewer not found: {}", id)))?;
    let mut updates = entry.session.subscribe();
    info!("SSE client following viewer {}", id);

    let stream = async_stream::stream! {
        loop {
            let snapshot = *updates.borrow_and_update();
            entry.touch();
            let view = entry.view_of(snapshot);
            match Event::default().event("ViewerState").json_data(&view) {
                Ok(event) => yield Ok(event),
                Err(e) => debug!("SSE: Could not encode viewer state: {}", e),
            }
            if !snapshot.open {
                break;
            }
            if updates.changed().await.is_err() {
                break;
            }
        }
        debug!("SSE: Viewer {} stream finished", id);
    };

    Ok(Sse::new(stream).keep_alive(keep_alive()))
}
