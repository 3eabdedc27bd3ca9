use crate::domain::Coordinate;
use crate::domain::coordinate::{is_valid_latitude, is_valid_longitude};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        struct Inner {
            latitude: f64,
            longitude: f64,
        }

        let inner = Inner::deserialize(deserializer)?;
        // Checked one by one first to report which of the two is out of range
        if !is_valid_latitude(inner.latitude) {
            return Err(Error::custom(format!("invalid latitude: {}, must be between -90 and 90", inner.latitude)));
        }

        if !is_valid_longitude(inner.longitude) {
            return Err(Error::custom(format!("invalid longitude: {}, must be between -180 and 180", inner.longitude)));
        }

        Coordinate::new(inner.latitude, inner.longitude).ok_or_else(|| Error::custom("invalid coordinate"))
    }
}
