use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;
use utoipa::ToSchema;

/// Frame keys whose values make up a sample.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::AsRefStr,
)]
pub enum FieldKey {
    #[strum(serialize = "L")]
    Location,
    #[strum(serialize = "R")]
    Rotation,
    #[strum(serialize = "G")]
    Gyroscope,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedReason {
    #[error("expected {expected} values, found {found}")]
    TokenCount { expected: usize, found: usize },
    #[error("value {index} is not a number: {token:?}")]
    NotANumber { index: usize, token: String },
    #[error("value {index} is not finite: {token:?}")]
    NonFinite { index: usize, token: String },
}

#[derive(Debug, Clone, PartialEq, Error, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DecodeError {
    #[error("no frames found in data")]
    NoFramesFound,
    #[error("message id not found")]
    MissingId,
    #[error("field {0}[...] not found")]
    MissingField(FieldKey),
    #[error("field {key}[...] malformed: {reason}")]
    MalformedField {
        key: FieldKey,
        reason: MalformedReason,
    },
}

impl DecodeError {
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// A non-fatal problem found while decoding a blob.
///
/// `frame` is the ordinal of the frame within the blob (absent for
/// blob-level problems) and `offset` the byte position the problem was
/// detected at: the offending field when there is one, otherwise the
/// start of the frame.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub frame: Option<usize>,
    pub offset: usize,
    pub message_id: Option<u64>,
    #[serde(serialize_with = "serialize_error")]
    #[schema(value_type = Object)]
    pub error: DecodeError,
}

impl Diagnostic {
    pub fn no_frames() -> Self {
        Self {
            frame: None,
            offset: 0,
            message_id: None,
            error: DecodeError::NoFramesFound,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(frame) = self.frame {
            write!(f, "frame {} at byte {}", frame, self.offset)?;
            if let Some(id) = self.message_id {
                write!(f, " (message {})", id)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{}", self.error)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
}

fn serialize_error<S: Serializer>(error: &DecodeError, serializer: S) -> Result<S::Ok, S::Error> {
    let key = match error {
        DecodeError::MissingField(key) | DecodeError::MalformedField { key, .. } => {
            Some(key.as_ref())
        }
        _ => None,
    };
    ErrorBody {
        kind: error.kind(),
        message: error.to_string(),
        key,
    }
    .serialize(serializer)
}
