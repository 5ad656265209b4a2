//! Decoding of beacon telemetry frames and the values derived from them
//! for the 3D renderer: a short-horizon orientation prediction and the
//! position on the globe.

pub mod beacon;
pub mod feed;
pub mod scene;
pub mod web;
