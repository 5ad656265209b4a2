use crate::beacon::{BeaconSample, Rotation};

/// Predict the orientation following `samples[index]` from the step taken
/// since `samples[index - 1]`.
///
/// Defined only when there is a previous sample and at least one sample
/// after `index`; otherwise there is no prediction. Each axis is
/// extrapolated on its own in raw degrees, with no wraparound at 0/360.
pub fn predict(samples: &[BeaconSample], index: usize) -> Option<Rotation> {
    if index == 0 || index + 1 >= samples.len() {
        return None;
    }
    let prev = &samples[index - 1].rotation;
    let curr = &samples[index].rotation;
    Some(extrapolate(prev, curr))
}

/// Constant-velocity step: `curr + (curr - prev)` per axis.
pub fn extrapolate(prev: &Rotation, curr: &Rotation) -> Rotation {
    Rotation {
        yaw: curr.yaw + (curr.yaw - prev.yaw),
        pitch: curr.pitch + (curr.pitch - prev.pitch),
        roll: curr.roll + (curr.roll - prev.roll),
    }
}
