//! Map viewer API
//!
//! The page opens a viewer for a spot, shows `frame_url` in an iframe and
//! reports the frame's load/error events back with the attempt token it was
//! given. Timeouts are handled server side; the page follows changes over
//! the viewer's SSE stream or by polling `GET /api/viewer/:id`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use jtour_common::catalog::spot_by_id;
use jtour_common::viewer::{Attempt, Transition};

use super::error::{ApiError, ApiResult};
use crate::viewers::{ViewerEntry, ViewerView};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OpenViewerRequest {
    pub spot_id: String,
}

/// Result of a frame signal or reset
#[derive(Debug, Serialize)]
pub struct SignalResponse {
    /// False when the signal was stale and nothing changed
    pub applied: bool,
    pub viewer: ViewerView,
}

async fn find(state: &AppState, id: Uuid) -> ApiResult<Arc<ViewerEntry>> {
    state
        .viewers
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Viewer not found: {}", id)))
}

fn respond(entry: &ViewerEntry, transition: Transition) -> Json<SignalResponse> {
    Json(SignalResponse {
        applied: transition.is_moved(),
        viewer: entry.view(),
    })
}

/// POST /api/viewer
pub async fn open_viewer(
    State(state): State<AppState>,
    Json(request): Json<OpenViewerRequest>,
) -> ApiResult<(StatusCode, Json<ViewerView>)> {
    let spot = spot_by_id(&request.spot_id)
        .ok_or_else(|| ApiError::NotFound(format!("Map spot not found: {}", request.spot_id)))?;

    let entry = state
        .viewers
        .open(
            spot,
            &state.approaches,
            state.maps_api_key.as_deref(),
            state.load_timeout,
        )
        .await;

    Ok((StatusCode::CREATED, Json(entry.view())))
}

/// GET /api/viewer/:id
pub async fn get_viewer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ViewerView>> {
    Ok(Json(find(&state, id).await?.view()))
}

/// POST /api/viewer/:id/loaded
pub async fn frame_loaded(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(attempt): Json<Attempt>,
) -> ApiResult<Json<SignalResponse>> {
    let entry = find(&state, id).await?;
    let transition = entry.session.frame_loaded(attempt);
    Ok(respond(&entry, transition))
}

/// POST /api/viewer/:id/failed
pub async fn frame_failed(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(attempt): Json<Attempt>,
) -> ApiResult<Json<SignalResponse>> {
    let entry = find(&state, id).await?;
    let transition = entry.session.frame_failed(attempt);
    Ok(respond(&entry, transition))
}

/// POST /api/viewer/:id/reset
pub async fn reset_viewer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SignalResponse>> {
    let entry = find(&state, id).await?;
    let transition = entry.session.reset();
    Ok(respond(&entry, transition))
}

/// DELETE /api/viewer/:id
pub async fn close_viewer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.viewers.close(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("Viewer not found: {}", id)))
    }
}
