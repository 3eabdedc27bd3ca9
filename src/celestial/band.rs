use crate::geo_math::normalize_degrees;

/// Where the reference body should be kept relative to the walking direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Band {
    Straight,
    /// Degrees to the left of the walking direction.
    Left(u32),
    Behind,
    /// Degrees to the right of the walking direction.
    Right(u32),
}

impl Band {
    /// Classifies the angle between the reference body and the target, measured clockwise from the body.
    ///
    /// Every band is closed on its lower edge and open on its upper edge:
    /// `[345, 15)` straight, `[15, 165)` left, `[165, 195)` behind and `[195, 345)` right.
    pub fn classify(relative_bearing: f64) -> Band {
        let bearing = normalize_degrees(relative_bearing);
        if bearing < 15.0 || bearing >= 345.0 {
            Band::Straight
        } else if bearing < 165.0 {
            Band::Left(bearing.round() as u32)
        } else if bearing < 195.0 {
            Band::Behind
        } else {
            Band::Right((360.0 - bearing).round() as u32)
        }
    }
}
