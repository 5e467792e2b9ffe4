use serde_json::Value;

use crate::error::{Error, Result, json_type_name};
use crate::invitations::geo::degrees_to_radians;

const COORDINATE_SHAPE: &str = "an object with numeric \"lat\" and \"long\" fields";

/// A lat/long pair, in degrees unless the producing context says radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub long: f64,
}

impl Coordinate {
    /// Reads a coordinate out of a JSON value. Both fields must be present
    /// and numeric, a missing field is a validation failure rather than a
    /// silent default.
    pub fn from_value(field: &'static str, value: &Value) -> Result<Self> {
        let Some(entries) = value.as_object() else {
            return Err(Error::TypeValidation {
                field,
                expected: COORDINATE_SHAPE,
                found: json_type_name(value),
            });
        };

        let lat = entries.get("lat").and_then(Value::as_f64);
        let long = entries.get("long").and_then(Value::as_f64);
        match (lat, long) {
            (Some(lat), Some(long)) => Ok(Coordinate { lat, long }),
            _ => Err(Error::TypeValidation {
                field,
                expected: COORDINATE_SHAPE,
                found: "an object without them",
            }),
        }
    }

    pub fn to_radians(self) -> Coordinate {
        Coordinate {
            lat: degrees_to_radians(self.lat),
            long: degrees_to_radians(self.long),
        }
    }
}
