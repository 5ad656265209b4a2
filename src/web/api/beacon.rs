use axum::{
    extract::{Path, State},
    Json,
};

use crate::beacon::BeaconSample;
use crate::feed::FeedStatus;
use crate::scene::FrameView;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/beacon/status",
    responses(
        (status = 200, description = "Feed status", body = FeedStatus)
    ),
    tag = "beacon"
)]
pub async fn status(State(state): State<AppState>) -> Json<FeedStatus> {
    let feed = state.feed.lock().await;
    Json(feed.status())
}

#[utoipa::path(
    get,
    path = "/api/beacon/samples",
    responses(
        (status = 200, description = "Samples of the latest refresh", body = Vec<BeaconSample>)
    ),
    tag = "beacon"
)]
pub async fn samples(State(state): State<AppState>) -> Json<Vec<BeaconSample>> {
    let feed = state.feed.lock().await;
    Json(feed.samples())
}

#[utoipa::path(
    get,
    path = "/api/beacon/frame",
    responses(
        (status = 200, description = "Sample under the playback cursor", body = Option<FrameView>)
    ),
    tag = "beacon"
)]
pub async fn current_frame(State(state): State<AppState>) -> Json<Option<FrameView>> {
    let feed = state.feed.lock().await;
    Json(feed.current_view())
}

#[utoipa::path(
    get,
    path = "/api/beacon/frame/{index}",
    params(
        ("index" = usize, Path, description = "Zero-based sample index")
    ),
    responses(
        (status = 200, description = "Sample at index", body = FrameView),
        (status = 404, description = "Index out of range", body = ErrorResponse)
    ),
    tag = "beacon"
)]
pub async fn frame_at(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<FrameView>> {
    let feed = state.feed.lock().await;
    feed.view_at(index)
        .map(Json)
        .ok_or(ApiError::NotFound("sample_not_found"))
}

#[utoipa::path(
    post,
    path = "/api/beacon/ingest",
    request_body(content = String, content_type = "text/plain", description = "Raw beacon data"),
    responses(
        (status = 200, description = "Feed status after the refresh", body = FeedStatus)
    ),
    tag = "beacon"
)]
pub async fn ingest(State(state): State<AppState>, body: String) -> Json<FeedStatus> {
    let feed = state.feed.lock().await;
    Json(feed.ingest(&body))
}
