use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::beacon::{decode as decode_blob, Decoded, Location};
use crate::scene::{project as project_location, ProjectedPoint};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    post,
    path = "/api/decode",
    request_body(content = String, content_type = "text/plain", description = "Raw beacon data"),
    responses(
        (status = 200, description = "Decoded samples and diagnostics", body = Decoded)
    ),
    tag = "decode"
)]
pub async fn decode(body: String) -> Json<Decoded> {
    Json(decode_blob(&body))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectQuery {
    /// Degrees
    pub latitude: f64,
    /// Degrees
    pub longitude: f64,
    /// Sphere radius, defaults to the configured one
    pub radius: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/project",
    params(ProjectQuery),
    responses(
        (status = 200, description = "Point on the sphere", body = ProjectedPoint),
        (status = 400, description = "Non-finite input", body = ErrorResponse)
    ),
    tag = "decode"
)]
pub async fn project(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> ApiResult<Json<ProjectedPoint>> {
    let radius = query.radius.unwrap_or(state.config.playback.radius);
    if !(query.latitude.is_finite() && query.longitude.is_finite() && radius.is_finite()) {
        return Err(ApiError::Validation("coordinates must be finite".into()));
    }

    let location = Location {
        latitude: query.latitude,
        longitude: query.longitude,
        altitude: 0.0,
    };
    Ok(Json(project_location(&location, radius)))
}
