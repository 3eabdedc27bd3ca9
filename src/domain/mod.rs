mod cardinal;
pub(crate) mod coordinate;
mod rescue_point;

pub use cardinal::Cardinal;
pub use coordinate::Coordinate;
pub use rescue_point::{RescuePoint, RescuePointKind};
