//! Great-circle math on a spherical earth.

use crate::domain::Coordinate;

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Returns the haversine distance between `a` and `b` in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + a.latitude().to_radians().cos() * b.latitude().to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h slightly above 1 for antipodal points
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Returns the initial great-circle bearing from `from` towards `to` in degrees clockwise from true north,
/// normalized to `[0, 360)`.
///
/// The bearing between coincident points is undefined, `0.0` is returned for them.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.latitude().to_radians();
    let phi2 = to.latitude().to_radians();
    let d_lambda = (to.longitude() - from.longitude()).to_radians();

    let y = d_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lambda.cos();
    if y.abs() < f64::EPSILON && x.abs() < f64::EPSILON {
        return 0.0;
    }

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Maps any finite angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid may return 360.0 for tiny negative inputs
    if normalized >= 360.0 { 0.0 } else { normalized }
}
