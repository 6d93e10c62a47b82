use crate::config::Config;
use crate::error::ApiError;
use crate::models::open_classrooms::{BuildingResult, UserLocation};
use crate::services::aggregator::aggregate;
use crate::services::data_loader::load_spaces;
use anyhow::{Context, Result};
use serde_json::{Map, Value};

const NO_DATA: &str = "No data provided";
const MISSING_COORDS: &str = "Invalid location data. 'lat' and 'lng' are required.";
const NON_NUMERIC_COORDS: &str = "Invalid location data. 'lat' and 'lng' must be numbers.";
const OUT_OF_RANGE_COORDS: &str = "Invalid location data. 'lat' or 'lng' out of range.";

/// Reloads the dataset and lists the buildings with visible slots.
pub async fn get_open_classrooms(
    config: &Config,
    location: Option<UserLocation>,
) -> Result<Vec<BuildingResult>> {
    let dataset = load_spaces(&config.data_path)
        .await
        .context("failed to load study spaces")?;

    let aggregation = aggregate(&dataset, config.current_time(), location)
        .context("failed to classify room slots")?;

    if !aggregation.skipped.is_empty() {
        tracing::debug!(
            count = aggregation.skipped.len(),
            "skipped malformed dataset entries: {:?}",
            aggregation.skipped
        );
    }

    Ok(aggregation.buildings)
}

/// Validates a `{"lat": .., "lng": ..}` request body.
///
/// Numbers and numeric strings are accepted for either field.
pub fn parse_location(body: &[u8]) -> Result<UserLocation, ApiError> {
    let bad_request = |message: &str| ApiError::BadRequest(message.to_string());

    let payload: Map<String, Value> =
        serde_json::from_slice(body).map_err(|_| bad_request(NO_DATA))?;

    let (Some(lat), Some(lng)) = (present(&payload, "lat"), present(&payload, "lng")) else {
        return Err(bad_request(MISSING_COORDS));
    };

    let (Some(lat), Some(lng)) = (as_number(lat), as_number(lng)) else {
        return Err(bad_request(NON_NUMERIC_COORDS));
    };

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(bad_request(OUT_OF_RANGE_COORDS));
    }

    Ok(UserLocation { lat, lng })
}

fn present<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    payload.get(key).filter(|value| !value.is_null())
}

// Booleans are rejected even though a loose float coercion would read them
// as 1.0/0.0; a boolean location is a client bug, not a coordinate.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejection(body: &str) -> String {
        match parse_location(body.as_bytes()) {
            Err(ApiError::BadRequest(message)) => message,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(
            parse_location(br#"{"lat": 42.35, "lng": -71}"#).unwrap(),
            UserLocation {
                lat: 42.35,
                lng: -71.0
            }
        );
        assert_eq!(
            parse_location(br#"{"lat": " 42.35", "lng": "-71.1"}"#).unwrap(),
            UserLocation {
                lat: 42.35,
                lng: -71.1
            }
        );
    }

    #[test]
    fn rejects_missing_payload() {
        assert_eq!(rejection(""), NO_DATA);
        assert_eq!(rejection("not json"), NO_DATA);
        assert_eq!(rejection("[1, 2]"), NO_DATA);
    }

    #[test]
    fn rejects_missing_fields() {
        assert_eq!(rejection(r#"{"lat": 1}"#), MISSING_COORDS);
        assert_eq!(rejection(r#"{"lat": null, "lng": 1}"#), MISSING_COORDS);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert_eq!(rejection(r#"{"lat": "x", "lng": 0}"#), NON_NUMERIC_COORDS);
        assert_eq!(rejection(r#"{"lat": true, "lng": 0}"#), NON_NUMERIC_COORDS);
        assert_eq!(rejection(r#"{"lat": [1], "lng": 0}"#), NON_NUMERIC_COORDS);
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(rejection(r#"{"lat": 100, "lng": -71.1}"#), OUT_OF_RANGE_COORDS);
        assert_eq!(rejection(r#"{"lat": 0, "lng": 180.5}"#), OUT_OF_RANGE_COORDS);
        assert_eq!(rejection(r#"{"lat": "NaN", "lng": 0}"#), OUT_OF_RANGE_COORDS);
        assert_eq!(rejection(r#"{"lat": "inf", "lng": 0}"#), OUT_OF_RANGE_COORDS);
        assert!(parse_location(br#"{"lat": -90, "lng": 180}"#).is_ok());
    }
}
