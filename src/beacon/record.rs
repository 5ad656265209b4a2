use crate::beacon::error::{DecodeError, FieldKey};
use crate::beacon::fields::{find_field, parse_values};
use crate::beacon::frames::find_header_id;
use crate::beacon::types::BeaconSample;

/// Why a frame was rejected, with the byte offset inside the frame where
/// the problem sits.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordError {
    pub error: DecodeError,
    pub offset: usize,
    pub message_id: Option<u64>,
}

/// Build a sample from one frame substring.
///
/// Only the id and the `L`, `R` and `G` fields are read; every other key
/// is ignored.
pub fn build_sample(frame: &str) -> Result<BeaconSample, RecordError> {
    let message_id = find_header_id(frame)
        .and_then(|digits| frame[digits].parse::<u64>().ok())
        .ok_or(RecordError {
            error: DecodeError::MissingId,
            offset: 0,
            message_id: None,
        })?;

    let read = |key: FieldKey| -> Result<[f64; 3], RecordError> {
        let field = find_field(frame, key.as_ref()).ok_or(RecordError {
            error: DecodeError::MissingField(key),
            offset: 0,
            message_id: Some(message_id),
        })?;
        parse_values(field.value).map_err(|reason| RecordError {
            error: DecodeError::MalformedField { key, reason },
            offset: field.offset,
            message_id: Some(message_id),
        })
    };

    let location = read(FieldKey::Location)?;
    let rotation = read(FieldKey::Rotation)?;
    let gyroscope = read(FieldKey::Gyroscope)?;

    Ok(BeaconSample {
        message_id,
        location: location.into(),
        rotation: rotation.into(),
        gyroscopic_acceleration: gyroscope.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beacon::error::MalformedReason;
    use crate::beacon::types::{GyroscopicAcceleration, Location, Rotation};

    const FRAME: &str = "Message 23435V[1.3]B[0003266717]D[0000-00-00T00:00:00]L[0.000,0.000,600.0]I[1]R[314.953583,-11.333508,6.500096]A[-0.264000,-0.042000,0.959000]G[-10.465000,-83.466003,15.338000]IR[0,0000000000]E[TFF] @@ RD[0000-01-01T00:53:38]IL";

    #[test]
    fn builds_sample_from_device_frame() {
        let sample = build_sample(FRAME).unwrap();
        assert_eq!(
            sample,
            BeaconSample {
                message_id: 23435,
                location: Location {
                    latitude: 0.0,
                    longitude: 0.0,
                    altitude: 600.0,
                },
                rotation: Rotation {
                    yaw: 314.953583,
                    pitch: -11.333508,
                    roll: 6.500096,
                },
                gyroscopic_acceleration: GyroscopicAcceleration {
                    yaw: -10.465,
                    pitch: -83.466003,
                    roll: 15.338,
                },
            }
        );
    }

    #[test]
    fn field_order_does_not_matter() {
        let frame = "Message 5 G[7,8,9] X[ignored] R[4,5,6] L[1,2,3] @@ RD[]IL";
        let sample = build_sample(frame).unwrap();
        assert_eq!(sample.message_id, 5);
        assert_eq!(sample.location.altitude, 3.0);
        assert_eq!(sample.rotation.yaw, 4.0);
        assert_eq!(sample.gyroscopic_acceleration.roll, 9.0);
    }

    #[test]
    fn missing_id() {
        let err = build_sample("L[1,2,3] R[4,5,6] G[7,8,9]").unwrap_err();
        assert_eq!(err.error, DecodeError::MissingId);
        assert_eq!(err.message_id, None);
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let err = build_sample("Message 1 R[4,5,6] G[7,8,9]").unwrap_err();
        assert_eq!(err.error, DecodeError::MissingField(FieldKey::Location));

        let err = build_sample("Message 1 L[1,2,3] R[4,5,6]").unwrap_err();
        assert_eq!(err.error, DecodeError::MissingField(FieldKey::Gyroscope));
        assert_eq!(err.message_id, Some(1));
    }

    #[test]
    fn malformed_field_points_at_key() {
        let frame = "Message 1 L[1,2,3] R[4,5] G[7,8,9]";
        let err = build_sample(frame).unwrap_err();
        assert_eq!(
            err.error,
            DecodeError::MalformedField {
                key: FieldKey::Rotation,
                reason: MalformedReason::TokenCount {
                    expected: 3,
                    found: 2
                },
            }
        );
        assert_eq!(err.offset, frame.find("R[").unwrap());
    }

    #[test]
    fn non_finite_value_rejects_frame() {
        let err = build_sample("Message 1 L[1,2,inf] R[4,5,6] G[7,8,9]").unwrap_err();
        assert!(matches!(
            err.error,
            DecodeError::MalformedField {
                key: FieldKey::Location,
                reason: MalformedReason::NonFinite { index: 2, .. }
            }
        ));
    }
}
