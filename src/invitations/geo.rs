use serde_json::Value;
use std::f64::consts::PI;

use crate::error::Result;
use crate::models::coordinate::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees to radians. Pure conversion, no validation.
pub fn degrees_to_radians(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// Great-circle distance in km between two coordinate values that are
/// already in radians, by the spherical law of cosines. Both arguments are
/// shape-checked before computing.
pub fn great_circle_distance(p1: &Value, p2: &Value) -> Result<f64> {
    let p1 = Coordinate::from_value("p1", p1)?;
    let p2 = Coordinate::from_value("p2", p2)?;
    Ok(distance_km(&p1, &p2))
}

/// Law-of-cosines core over coordinates already validated and in radians.
/// The cosine is clamped so rounding on near-identical points cannot push
/// `acos` out of its domain.
pub(crate) fn distance_km(p1: &Coordinate, p2: &Coordinate) -> f64 {
    let dlong = (p2.long - p1.long).abs();
    let cos_angle = (p1.lat.sin() * p2.lat.sin() + p1.lat.cos() * p2.lat.cos() * dlong.cos())
        .clamp(-1.0, 1.0);
    EARTH_RADIUS_KM * cos_angle.acos()
}
