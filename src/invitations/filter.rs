use std::cmp::Ordering;

use serde_json::Value;
use tracing::error;

use crate::error::{Error, Result, json_type_name};
use crate::invitations::geo::distance_km;
use crate::models::coordinate::Coordinate;
use crate::models::invitation::{MatchedAddress, MatchedOrganization};

/// Filters `partners` down to the organizations with at least one office
/// within `max_distance_km` of `origin`, each annotated with per-office
/// distances and sorted ascending by organization name.
///
/// A malformed top-level argument or partner record fails the whole call.
/// A malformed single office is logged and skipped, it never aborts the
/// rest of the filter.
pub fn filter_partners_by_distance(
    origin: &Value,
    max_distance_km: &Value,
    partners: &Value,
) -> Result<Vec<MatchedOrganization>> {
    let origin = Coordinate::from_value("origin", origin)?.to_radians();

    let Some(max_distance_km) = max_distance_km.as_f64() else {
        return Err(Error::TypeValidation {
            field: "max_distance_km",
            expected: "a number",
            found: json_type_name(max_distance_km),
        });
    };
    let Some(partners) = partners.as_array() else {
        return Err(Error::TypeValidation {
            field: "partners",
            expected: "an array",
            found: json_type_name(partners),
        });
    };

    let mut matches = Vec::new();
    for partner in partners {
        let (organization, offices) = require_partner_fields(partner)?;

        let mut addresses = Vec::new();
        for office in offices {
            let address = office.get("address").and_then(Value::as_str).unwrap_or("");
            let Some(coordinates) = provided_coordinates(office) else {
                continue;
            };

            match office_coordinate(address, coordinates) {
                Ok(coordinate) => {
                    let distance = distance_km(&origin, &coordinate.to_radians());
                    if distance <= max_distance_km {
                        addresses.push(MatchedAddress {
                            address: address.to_string(),
                            distance,
                        });
                    }
                }
                Err(e) => error!("skipping office of {}: {}", organization, e),
            }
        }

        if !addresses.is_empty() {
            matches.push(MatchedOrganization {
                organization: organization.to_string(),
                addresses,
            });
        }
    }

    matches.sort_by(|a, b| organization_order(&a.organization, &b.organization));
    Ok(matches)
}

/// Requires the `organization` and `offices` fields every partner record
/// must carry. Shared with the directory so a replace rejects the same
/// records the filter would.
pub(crate) fn require_partner_fields(partner: &Value) -> Result<(&str, &Vec<Value>)> {
    let organization = match partner.get("organization") {
        Some(Value::String(name)) if !name.is_empty() => name.as_str(),
        Some(Value::String(_)) => {
            return Err(Error::SchemaValidation {
                field: "organization",
                expected: "a non-empty string",
                found: "an empty string",
            });
        }
        Some(other) => {
            return Err(Error::SchemaValidation {
                field: "organization",
                expected: "a non-empty string",
                found: json_type_name(other),
            });
        }
        None => {
            return Err(Error::SchemaValidation {
                field: "organization",
                expected: "a non-empty string",
                found: "nothing",
            });
        }
    };

    let offices = match partner.get("offices") {
        Some(Value::Array(offices)) => offices,
        Some(other) => {
            return Err(Error::SchemaValidation {
                field: "offices",
                expected: "an array",
                found: json_type_name(other),
            });
        }
        None => {
            return Err(Error::SchemaValidation {
                field: "offices",
                expected: "an array",
                found: "nothing",
            });
        }
    };

    Ok((organization, offices))
}

/// An office with absent, null or empty `coordinates` has simply not
/// provided any and is skipped without an error.
fn provided_coordinates(office: &Value) -> Option<&Value> {
    match office.get("coordinates") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(other) => Some(other),
    }
}

fn office_coordinate(address: &str, raw: &Value) -> Result<Coordinate> {
    let Some(text) = raw.as_str() else {
        return Err(Error::OfficeValidation {
            address: address.to_string(),
            reason: format!(
                "coordinates should be a string but found {}",
                json_type_name(raw)
            ),
        });
    };

    let mut components = text.split(',');
    let (Some(lat), Some(long), None) = (components.next(), components.next(), components.next())
    else {
        return Err(Error::OfficeValidation {
            address: address.to_string(),
            reason: format!("coordinates should be \"lat,long\" but found {text:?}"),
        });
    };

    Ok(Coordinate {
        lat: coordinate_component(address, "lat", lat)?,
        long: coordinate_component(address, "long", long)?,
    })
}

fn coordinate_component(address: &str, label: &str, raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::OfficeValidation {
            address: address.to_string(),
            reason: format!("{label} component {raw:?} is not a finite number"),
        }),
    }
}

/// Ascending, case-insensitive by Unicode lowercase, raw order only as a
/// tie-break within a case class.
fn organization_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn origin() -> Value {
        json!({ "lat": 51.515419, "long": -0.141099 })
    }

    fn default_partners() -> Value {
        json!([
            {
                "organization": "Balance at Work",
                "offices": [
                    {
                        "address": "Suite 1308, 109 Pitt St \nSydney 2000",
                        "coordinates": "-33.8934219,151.20404600000006"
                    }
                ]
            },
            {
                "organization": "Spring Development",
                "offices": [
                    {
                        "address": "Banbury, Oxfordshire",
                        "coordinates": "52.0629009,-1.3397750000000315"
                    }
                ]
            },
            {
                "organization": "Blue Square 360",
                "offices": [
                    {
                        "address": "Ocean Financial Centre, Level 40, 10 Collyer Quay, Singapore, 049315",
                        "coordinates": "1.28304,103.85199319999992"
                    },
                    {
                        "address": "St Saviours Wharf, London SE1 2BE",
                        "coordinates": "51.5014767,-0.0713608999999451"
                    }
                ]
            },
        ])
    }

    fn organizations(matches: &[MatchedOrganization]) -> Vec<&str> {
        matches.iter().map(|m| m.organization.as_str()).collect()
    }

    #[test]
    fn matches_an_office_at_the_origin() {
        let partners = json!([
            {
                "organization": "Blue Square 360",
                "offices": [
                    { "address": "St Saviours Wharf, London SE1 2BE", "coordinates": "51.515419,-0.141099" }
                ]
            }
        ]);

        let matches = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].organization, "Blue Square 360");
        assert_eq!(matches[0].addresses.len(), 1);
        assert!(matches[0].addresses[0].distance.abs() < 1e-3);
    }

    #[test]
    fn ignores_partners_beyond_the_maximum_distance() {
        let partners = json!([
            {
                "organization": "Balance at Work",
                "offices": [
                    { "address": "Suite 1308, 109 Pitt St \nSydney 2000", "coordinates": "-33.8934219,151.20404600000006" }
                ]
            }
        ]);

        let matches = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn the_distance_cutoff_is_inclusive() {
        let partners = json!([
            {
                "organization": "Spring Development",
                "offices": [
                    { "address": "Banbury, Oxfordshire", "coordinates": "52.0629009,-1.3397750000000315" }
                ]
            }
        ]);

        let all = filter_partners_by_distance(&origin(), &json!(1e9), &partners).unwrap();
        let banbury = all[0].addresses[0].distance;

        let at_cutoff = filter_partners_by_distance(&origin(), &json!(banbury), &partners).unwrap();
        assert_eq!(organizations(&at_cutoff), ["Spring Development"]);

        let below = json!(banbury * (1.0 - 1e-12));
        let below_cutoff = filter_partners_by_distance(&origin(), &below, &partners).unwrap();
        assert!(below_cutoff.is_empty());
    }

    #[test]
    fn rejects_an_origin_that_is_not_a_coordinate() {
        let err = filter_partners_by_distance(&json!(""), &json!(100), &default_partners())
            .unwrap_err();
        assert!(matches!(err, Error::TypeValidation { field: "origin", .. }));

        let err = filter_partners_by_distance(&json!({}), &json!(100), &default_partners())
            .unwrap_err();
        assert!(matches!(err, Error::TypeValidation { field: "origin", .. }));
    }

    #[test]
    fn rejects_a_max_distance_that_is_not_a_number() {
        let err = filter_partners_by_distance(&origin(), &json!(""), &default_partners())
            .unwrap_err();
        assert_eq!(
            err,
            Error::TypeValidation {
                field: "max_distance_km",
                expected: "a number",
                found: "string",
            }
        );
    }

    #[test]
    fn rejects_partners_that_are_not_an_array() {
        let err = filter_partners_by_distance(&origin(), &json!(100), &json!("")).unwrap_err();
        assert_eq!(
            err,
            Error::TypeValidation {
                field: "partners",
                expected: "an array",
                found: "string",
            }
        );
    }

    #[test]
    fn a_partner_without_an_organization_fails_the_whole_call() {
        let partners = json!([ { "offices": [] } ]);
        let err = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaValidation {
                field: "organization",
                ..
            }
        ));

        let partners = json!([ { "organization": "", "offices": [] } ]);
        let err = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaValidation {
                field: "organization",
                ..
            }
        ));
    }

    #[test]
    fn a_partner_without_an_offices_array_fails_the_whole_call() {
        let partners = json!([ { "organization": "Test organization" } ]);
        let err = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaValidation { field: "offices", .. }
        ));
    }

    #[test]
    fn offices_without_coordinates_are_skipped_silently() {
        let partners = json!([
            {
                "organization": "Blue Square 360",
                "offices": [
                    { "address": "no coordinates at all" },
                    { "address": "null coordinates", "coordinates": null },
                    { "address": "empty coordinates", "coordinates": "" },
                    { "address": "St Saviours Wharf, London SE1 2BE", "coordinates": "51.515419,-0.141099" }
                ]
            },
            {
                "organization": "Unmapped Ltd",
                "offices": [ { "address": "nowhere" } ]
            }
        ]);

        let matches = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap();
        assert_eq!(organizations(&matches), ["Blue Square 360"]);
        assert_eq!(matches[0].addresses.len(), 1);
        assert_eq!(
            matches[0].addresses[0].address,
            "St Saviours Wharf, London SE1 2BE"
        );
    }

    #[test]
    fn malformed_office_coordinates_never_abort_the_call() {
        let partners = json!([
            {
                "organization": "Blue Square 360",
                "offices": [
                    { "address": "not numbers", "coordinates": "abc,def" },
                    { "address": "one component", "coordinates": "51.5" },
                    { "address": "three components", "coordinates": "51.5,-0.1,7" },
                    { "address": "not finite", "coordinates": "NaN,-0.1" },
                    { "address": "not a string", "coordinates": 42 },
                    { "address": "St Saviours Wharf, London SE1 2BE", "coordinates": "51.515419,-0.141099" }
                ]
            }
        ]);

        let matches = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].addresses.len(), 1);
        assert_eq!(
            matches[0].addresses[0].address,
            "St Saviours Wharf, London SE1 2BE"
        );
    }

    #[test]
    fn results_are_sorted_by_organization_name() {
        let at_origin = |organization: &str| {
            json!({
                "organization": organization,
                "offices": [ { "address": "London", "coordinates": "51.515419,-0.141099" } ]
            })
        };
        let orderings = [
            ["Balance at Work", "Blue Square 360", "Spring Development"],
            ["Spring Development", "Blue Square 360", "Balance at Work"],
            ["Blue Square 360", "Balance at Work", "Spring Development"],
        ]
        .map(|names| Value::Array(names.into_iter().map(|name| at_origin(name)).collect()));
        for partners in &orderings {
            let matches = filter_partners_by_distance(&origin(), &json!(100), partners).unwrap();
            assert_eq!(
                organizations(&matches),
                ["Balance at Work", "Blue Square 360", "Spring Development"]
            );
        }
    }

    #[test]
    fn sorting_is_case_insensitive() {
        let partners = json!([
            {
                "organization": "Beta Ltd",
                "offices": [ { "address": "London", "coordinates": "51.515419,-0.141099" } ]
            },
            {
                "organization": "alpha Works",
                "offices": [ { "address": "London", "coordinates": "51.515419,-0.141099" } ]
            }
        ]);

        let matches = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap();
        assert_eq!(organizations(&matches), ["alpha Works", "Beta Ltd"]);
    }

    #[test]
    fn addresses_keep_office_encounter_order() {
        let partners = json!([
            {
                "organization": "Blue Square 360",
                "offices": [
                    { "address": "St Saviours Wharf, London SE1 2BE", "coordinates": "51.5014767,-0.0713608999999451" },
                    { "address": "Ocean Financial Centre, Level 40, 10 Collyer Quay, Singapore, 049315", "coordinates": "1.28304,103.85199319999992" },
                    { "address": "Oxford Street, London", "coordinates": "51.515419,-0.141099" }
                ]
            }
        ]);

        let matches = filter_partners_by_distance(&origin(), &json!(100), &partners).unwrap();
        let addresses: Vec<&str> = matches[0]
            .addresses
            .iter()
            .map(|a| a.address.as_str())
            .collect();
        assert_eq!(
            addresses,
            ["St Saviours Wharf, London SE1 2BE", "Oxford Street, London"]
        );
    }

    #[test]
    fn filters_the_default_partner_list() {
        let matches =
            filter_partners_by_distance(&origin(), &json!(100), &default_partners()).unwrap();
        assert_eq!(organizations(&matches), ["Blue Square 360"]);

        let matches =
            filter_partners_by_distance(&origin(), &json!(200), &default_partners()).unwrap();
        assert_eq!(
            organizations(&matches),
            ["Blue Square 360", "Spring Development"]
        );
    }
}
