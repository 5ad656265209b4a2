use utoipa::OpenApi;

use super::api::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::beacon::status,
        super::api::beacon::samples,
        super::api::beacon::current_frame,
        super::api::beacon::frame_at,
        super::api::beacon::ingest,
        super::api::decode::decode,
        super::api::decode::project,
    ),
    components(
        schemas(
            ErrorResponse,
            crate::beacon::BeaconSample,
            crate::beacon::Location,
            crate::beacon::Rotation,
            crate::beacon::GyroscopicAcceleration,
            crate::beacon::Diagnostic,
            crate::beacon::Decoded,
            crate::feed::FeedMode,
            crate::feed::FeedStatus,
            crate::scene::FrameView,
            crate::scene::ProjectedPoint,
            crate::scene::Direction,
        )
    ),
    info(
        title = "Beacon Viz API",
        description = "Decoded beacon telemetry for the 3D renderer",
        version = "0.1.0"
    ),
    tags(
        (name = "beacon", description = "Live feed of the polled beacon data"),
        (name = "decode", description = "Stateless decoding and projection")
    )
)]
pub struct ApiDoc;
