use serde::Serialize;
use utoipa::ToSchema;

/// Geodetic position reported in the `L[...]` field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Device-native unit, not used for placement.
    pub altitude: f64,
}

/// Euler angles in degrees, as reported in the `R[...]` field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct Rotation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Angular rate per axis, as reported in the `G[...]` field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GyroscopicAcceleration {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// One fully decoded telemetry frame. Every numeric field is finite.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BeaconSample {
    pub message_id: u64,
    pub location: Location,
    pub rotation: Rotation,
    pub gyroscopic_acceleration: GyroscopicAcceleration,
}

impl From<[f64; 3]> for Location {
    fn from([latitude, longitude, altitude]: [f64; 3]) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}

impl From<[f64; 3]> for Rotation {
    fn from([yaw, pitch, roll]: [f64; 3]) -> Self {
        Self { yaw, pitch, roll }
    }
}

impl From<[f64; 3]> for GyroscopicAcceleration {
    fn from([yaw, pitch, roll]: [f64; 3]) -> Self {
        Self { yaw, pitch, roll }
    }
}
