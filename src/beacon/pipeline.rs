use serde::Serialize;
use utoipa::ToSchema;

use crate::beacon::error::Diagnostic;
use crate::beacon::frames::frames;
use crate::beacon::record::build_sample;
use crate::beacon::types::BeaconSample;

/// Output of one decode cycle: the samples that built, in blob order, and
/// everything that was dropped along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Decoded {
    pub samples: Vec<BeaconSample>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode every frame in `blob`. A bad frame is dropped and reported; it
/// never stops the rest of the blob from decoding.
pub fn decode(blob: &str) -> Decoded {
    let mut decoded = Decoded::default();
    let mut seen = 0;

    for (index, frame) in frames(blob).enumerate() {
        seen += 1;
        match build_sample(frame.text) {
            Ok(sample) => decoded.samples.push(sample),
            Err(e) => decoded.diagnostics.push(Diagnostic {
                frame: Some(index),
                offset: frame.offset + e.offset,
                message_id: e.message_id,
                error: e.error,
            }),
        }
    }

    if seen == 0 {
        decoded.diagnostics.push(Diagnostic::no_frames());
    }

    decoded
}
