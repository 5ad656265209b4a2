mod extrapolate;
mod projection;
mod view;

pub use extrapolate::{extrapolate, predict};
pub use projection::{project, ProjectedPoint, DEFAULT_RADIUS};
pub use view::{heading, Direction, FrameView};
