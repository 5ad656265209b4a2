mod error;
mod fields;
mod frames;
mod pipeline;
mod record;
mod types;

pub use error::{DecodeError, Diagnostic, FieldKey, MalformedReason};
pub use fields::{find_field, parse_values, Field};
pub use frames::{frames, Frame, Frames};
pub use pipeline::{decode, Decoded};
pub use record::{build_sample, RecordError};
pub use types::{BeaconSample, GyroscopicAcceleration, Location, Rotation};
