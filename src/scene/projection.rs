use std::f64::consts::PI;

use serde::Serialize;
use utoipa::ToSchema;

use crate::beacon::Location;

/// Sphere radius the renderer's scene is built around.
pub const DEFAULT_RADIUS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Place a location on a sphere of `radius` in the renderer's frame:
/// `y` is the polar axis and longitude is shifted by 180 degrees.
/// Altitude is ignored. The operation order is fixed so results match the
/// renderer's own placement exactly.
pub fn project(location: &Location, radius: f64) -> ProjectedPoint {
    let phi = ((90.0 - location.latitude) * PI) / 180.0;
    let theta = ((location.longitude + 180.0) * PI) / 180.0;

    ProjectedPoint {
        x: -radius * phi.sin() * theta.cos(),
        y: radius * phi.cos(),
        z: radius * phi.sin() * theta.sin(),
    }
}
