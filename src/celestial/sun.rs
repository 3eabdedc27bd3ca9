use crate::domain::Coordinate;
use chrono::{DateTime, Duration, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};
use tracing::trace;

/// Beyond this latitude the sun may not rise or set at all.
const MAX_SOLAR_LATITUDE: f64 = 65.0;

/// Seconds of solar time per degree of longitude.
const SECONDS_PER_DEGREE: f64 = 240.0;

const EAST: f64 = 90.0;
const WEST: f64 = 270.0;

/// Returns the rough azimuth of the sun at `position`: east before solar noon, west after.
/// Returns `None` while the sun is down or when the position is too close to a pole.
pub fn sun_azimuth(position: Coordinate, at: DateTime<Utc>) -> Option<f64> {
    let (sunrise, sunset) = daylight(position, at)?;
    if at < sunrise || at >= sunset {
        return None;
    }

    let solar_noon = sunrise + (sunset - sunrise) / 2;
    if at < solar_noon { Some(EAST) } else { Some(WEST) }
}

/// Returns whether the sun is up at `position`, or `None` when the position is too close to a pole to tell.
pub fn is_sun_up(position: Coordinate, at: DateTime<Utc>) -> Option<bool> {
    daylight(position, at).map(|(sunrise, sunset)| at >= sunrise && at < sunset)
}

/// Sunrise and sunset of the local solar day containing `at`.
fn daylight(position: Coordinate, at: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if position.latitude().abs() > MAX_SOLAR_LATITUDE {
        return None;
    }

    let coordinates = Coordinates::new(position.latitude(), position.longitude())?;
    // Use the local solar date, the UTC date is off by one near the date line
    let local_date = (at + Duration::seconds((position.longitude() * SECONDS_PER_DEGREE) as i64)).date_naive();

    let day = SolarDay::new(coordinates, local_date);
    let sunrise = day.event_time(SolarEvent::Sunrise);
    let sunset = day.event_time(SolarEvent::Sunset);
    trace!(%sunrise, %sunset, "Solar day");

    Some((sunrise, sunset))
}
