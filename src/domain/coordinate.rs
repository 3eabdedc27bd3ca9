/// A position on the earth in decimal degrees.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Returns `None` if latitude is outside [-90, 90] or longitude outside [-180, 180].
    pub const fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if is_valid_latitude(latitude) && is_valid_longitude(longitude) {
            Some(Coordinate { latitude, longitude })
        } else {
            None
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn is_northern_hemisphere(&self) -> bool {
        self.latitude >= 0.0
    }
}

// Written as comparisons so they can be used in a const fn, NaN fails both
pub(crate) const fn is_valid_latitude(latitude: f64) -> bool {
    latitude >= -90.0 && latitude <= 90.0
}

pub(crate) const fn is_valid_longitude(longitude: f64) -> bool {
    longitude >= -180.0 && longitude <= 180.0
}
