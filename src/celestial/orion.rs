use crate::domain::Coordinate;
use crate::geo_math::normalize_degrees;
use chrono::{DateTime, Utc};
use tracing::trace;

/// Alnilam, the middle star of the belt, in degrees.
const BELT_RIGHT_ASCENSION: f64 = 84.0534;
const BELT_DECLINATION: f64 = -1.2019;

/// 2000-01-01T12:00:00Z in milliseconds since the unix epoch.
const J2000_UNIX_MILLIS: i64 = 946_728_000_000;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Too close to the horizon to be picked out reliably.
const MIN_ALTITUDE: f64 = 5.0;
/// Too close to the zenith for its azimuth to be a usable direction.
const MAX_ALTITUDE: f64 = 60.0;

/// Returns the azimuth of Orion's Belt at `position`, clockwise from true north.
///
/// The belt lies on the celestial equator, so it rises due east and sets due west from everywhere
/// on earth. Returns `None` while it is below [`MIN_ALTITUDE`] or above [`MAX_ALTITUDE`]. Daylight is
/// not taken into account.
pub fn orion_azimuth(position: Coordinate, at: DateTime<Utc>) -> Option<f64> {
    let (hour_angle, altitude) = hour_angle_and_altitude(position, at);
    trace!(hour_angle, altitude, "Orion's Belt");

    if !(MIN_ALTITUDE..=MAX_ALTITUDE).contains(&altitude) {
        return None;
    }

    let phi = position.latitude().to_radians();
    let delta = BELT_DECLINATION.to_radians();
    let h = hour_angle.to_radians();
    // Measured from the south, turned around to count from the north
    let azimuth = h.sin().atan2(h.cos() * phi.sin() - delta.tan() * phi.cos()).to_degrees() + 180.0;

    Some(normalize_degrees(azimuth))
}

/// Returns the local hour angle in `(-180, 180]` degrees, negative while rising, and the altitude in degrees.
fn hour_angle_and_altitude(position: Coordinate, at: DateTime<Utc>) -> (f64, f64) {
    let days = (at.timestamp_millis() - J2000_UNIX_MILLIS) as f64 / MILLIS_PER_DAY;
    let greenwich_sidereal = 280.460_618_37 + 360.985_647_366_29 * days;
    let local_sidereal = greenwich_sidereal + position.longitude();

    let mut hour_angle = normalize_degrees(local_sidereal - BELT_RIGHT_ASCENSION);
    if hour_angle > 180.0 {
        hour_angle -= 360.0;
    }

    let phi = position.latitude().to_radians();
    let delta = BELT_DECLINATION.to_radians();
    let sin_altitude = phi.sin() * delta.sin() + phi.cos() * delta.cos() * hour_angle.to_radians().cos();

    (hour_angle, sin_altitude.clamp(-1.0, 1.0).asin().to_degrees())
}
