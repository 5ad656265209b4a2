use serde::Serialize;
use utoipa::ToSchema;

use crate::beacon::{BeaconSample, Rotation};
use crate::scene::extrapolate::predict;
use crate::scene::projection::{project, ProjectedPoint};

/// Unit vector in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Direction {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Everything the renderer needs to draw the sample at one index.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FrameView {
    pub index: usize,
    pub sample: BeaconSample,
    pub position: ProjectedPoint,
    pub prediction: Option<Rotation>,
    pub heading: Option<Direction>,
}

impl FrameView {
    pub fn at(samples: &[BeaconSample], index: usize, radius: f64) -> Option<Self> {
        let sample = samples.get(index)?;
        let prediction = predict(samples, index);
        Some(Self {
            index,
            sample: sample.clone(),
            position: project(&sample.location, radius),
            heading: prediction.as_ref().and_then(heading),
            prediction,
        })
    }
}

/// Direction the prediction arrow points along, from predicted yaw and
/// pitch. Roll does not change the direction.
pub fn heading(rotation: &Rotation) -> Option<Direction> {
    let yaw = rotation.yaw.to_radians();
    let pitch = rotation.pitch.to_radians();

    let x = pitch.sin() * yaw.cos();
    let y = pitch.sin();
    let z = pitch.cos() * yaw.sin();

    let len = (x * x + y * y + z * z).sqrt();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    Some(Direction {
        x: x / len,
        y: y / len,
        z: z / len,
    })
}
