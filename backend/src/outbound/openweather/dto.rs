//! DTOs for decoding OpenWeather geocoding and current-weather responses.
//!
//! Geocoding candidates are decoded strictly. Current-weather sections are
//! kept as raw JSON so each measurement can be extracted on its own; a
//! missing or mistyped measurement becomes `None` without affecting the
//! others.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::GeocodingCandidate;
use crate::domain::{Coordinates, WeatherReading};

#[derive(Debug, Deserialize)]
pub(super) struct GeocodingCandidateDto {
    pub(super) name: String,
    pub(super) lat: f64,
    pub(super) lon: f64,
    #[serde(default)]
    pub(super) country: Option<String>,
}

impl GeocodingCandidateDto {
    pub(super) fn into_domain(self) -> Result<GeocodingCandidate, String> {
        if self.name.trim().is_empty() {
            return Err("candidate name is blank".to_owned());
        }
        let coordinates = Coordinates::new(self.lat, self.lon)
            .map_err(|error| format!("candidate {} has invalid coordinates: {error}", self.name))?;
        Ok(GeocodingCandidate {
            name: self.name,
            coordinates,
            country_code: self.country.filter(|code| !code.trim().is_empty()),
        })
    }
}

/// Decode a geocoding body into an ordered candidate list.
///
/// The body must be a JSON array. The first candidate must be well formed;
/// later malformed entries are dropped since only the first is ever used.
pub(super) fn decode_candidates(body: &[u8]) -> Result<Vec<GeocodingCandidate>, String> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|error| format!("invalid geocoding JSON payload: {error}"))?;
    let Value::Array(elements) = value else {
        return Err("expected a JSON array of candidates".to_owned());
    };

    let mut candidates = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let decoded = serde_json::from_value::<GeocodingCandidateDto>(element)
            .map_err(|error| format!("malformed candidate: {error}"))
            .and_then(GeocodingCandidateDto::into_domain);
        match decoded {
            Ok(candidate) => candidates.push(candidate),
            Err(message) if index == 0 => return Err(message),
            Err(message) => {
                tracing::debug!(index, %message, "skipping malformed geocoding candidate");
            }
        }
    }
    Ok(candidates)
}

#[derive(Debug, Deserialize)]
pub(super) struct CurrentWeatherDto {
    pub(super) dt: i64,
    #[serde(default)]
    pub(super) main: Option<Value>,
    #[serde(default)]
    pub(super) wind: Option<Value>,
    #[serde(default)]
    pub(super) weather: Option<Value>,
}

impl CurrentWeatherDto {
    pub(super) fn into_domain(self) -> Result<WeatherReading, String> {
        let observed_at = DateTime::from_timestamp(self.dt, 0)
            .ok_or_else(|| format!("timestamp {} is out of range", self.dt))?;
        let main = self.main.as_ref();

        Ok(WeatherReading {
            observed_at,
            air_temperature: main.and_then(|m| m.get("temp")).and_then(Value::as_f64),
            humidity: main
                .and_then(|m| m.get("humidity"))
                .and_then(Value::as_i64)
                .and_then(|h| i32::try_from(h).ok()),
            wind_speed: self
                .wind
                .as_ref()
                .and_then(|w| w.get("speed"))
                .and_then(Value::as_f64),
            condition_code: self
                .weather
                .as_ref()
                .and_then(|w| w.pointer("/0/icon"))
                .and_then(Value::as_str)
                .filter(|icon| !icon.is_empty())
                .map(str::to_owned),
        })
    }
}

/// Decode a current-weather body. Only `dt` is mandatory.
pub(super) fn decode_reading(body: &[u8]) -> Result<WeatherReading, String> {
    let dto: CurrentWeatherDto = serde_json::from_slice(body)
        .map_err(|error| format!("invalid weather JSON payload: {error}"))?;
    dto.into_domain()
}

#[cfg(test)]
mod tests {
    //! Decoding coverage for provider payloads.

    use super::*;
    use rstest::rstest;

    #[test]
    fn canonical_name_and_coordinates_come_from_the_provider() {
        let body = br#"[{"name":"Tallinn","local_names":{"et":"Tallinn"},
            "lat":59.4372155,"lon":24.7453688,"country":"EE"}]"#;

        let candidates = decode_candidates(body).expect("candidates decode");

        assert_eq!(candidates.len(), 1);
        let first = &candidates[0];
        assert_eq!(first.name, "Tallinn");
        assert_eq!(first.coordinates.latitude(), 59.4372155);
        assert_eq!(first.coordinates.longitude(), 24.7453688);
        assert_eq!(first.country_code.as_deref(), Some("EE"));
    }

    #[test]
    fn empty_array_decodes_to_no_candidates() {
        assert!(decode_candidates(b"[]").expect("decodes").is_empty());
    }

    #[rstest]
    #[case::object(br#"{"cod":"400","message":"Nothing to geocode"}"#.as_slice())]
    #[case::null(b"null".as_slice())]
    #[case::garbage(b"<html>".as_slice())]
    fn non_array_bodies_are_rejected(#[case] body: &[u8]) {
        assert!(decode_candidates(body).is_err());
    }

    #[rstest]
    #[case::missing_name(br#"[{"lat":1.0,"lon":2.0}]"#.as_slice())]
    #[case::string_lat(br#"[{"name":"X","lat":"1.0","lon":2.0}]"#.as_slice())]
    #[case::out_of_range(br#"[{"name":"X","lat":95.0,"lon":2.0}]"#.as_slice())]
    #[case::blank_name(br#"[{"name":" ","lat":1.0,"lon":2.0}]"#.as_slice())]
    fn malformed_first_candidate_is_rejected(#[case] body: &[u8]) {
        assert!(decode_candidates(body).is_err());
    }

    #[test]
    fn malformed_later_candidates_are_skipped() {
        let body = br#"[{"name":"Springfield","lat":39.8,"lon":-89.6},{"name":"Broken"}]"#;
        let candidates = decode_candidates(body).expect("first candidate decodes");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Springfield");
    }

    #[test]
    fn timestamp_only_response_yields_empty_measurements() {
        let reading = decode_reading(br#"{"dt": 1661870592}"#).expect("decodes");

        assert_eq!(reading.observed_at.timestamp(), 1_661_870_592);
        assert_eq!(reading.air_temperature, None);
        assert_eq!(reading.wind_speed, None);
        assert_eq!(reading.humidity, None);
        assert_eq!(reading.condition_code, None);
    }

    #[test]
    fn full_response_yields_every_measurement() {
        let body = br#"{
            "coord": {"lon": 24.7535, "lat": 59.437},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 29.48, "feels_like": 31.2, "pressure": 1012, "humidity": 64},
            "wind": {"speed": 3.62, "deg": 200},
            "dt": 1661870592,
            "name": "Tallinn"
        }"#;

        let reading = decode_reading(body).expect("decodes");

        assert_eq!(reading.observed_at.timestamp(), 1_661_870_592);
        assert_eq!(reading.air_temperature, Some(29.48));
        assert_eq!(reading.humidity, Some(64));
        assert_eq!(reading.wind_speed, Some(3.62));
        assert_eq!(reading.condition_code.as_deref(), Some("01d"));
    }

    #[test]
    fn mistyped_fields_only_blank_themselves() {
        let body = br#"{
            "dt": 1661870592,
            "main": {"temp": "hot", "humidity": 64},
            "wind": {"speed": 3.62},
            "weather": []
        }"#;

        let reading = decode_reading(body).expect("decodes");

        assert_eq!(reading.air_temperature, None);
        assert_eq!(reading.humidity, Some(64));
        assert_eq!(reading.wind_speed, Some(3.62));
        assert_eq!(reading.condition_code, None);
    }

    #[test]
    fn integer_temperature_is_accepted() {
        let reading = decode_reading(br#"{"dt": 1, "main": {"temp": 21}}"#).expect("decodes");
        assert_eq!(reading.air_temperature, Some(21.0));
    }

    #[test]
    fn fractional_humidity_is_treated_as_absent() {
        let reading =
            decode_reading(br#"{"dt": 1, "main": {"humidity": 64.5}}"#).expect("decodes");
        assert_eq!(reading.humidity, None);
    }

    #[rstest]
    #[case::missing(br#"{"main": {"temp": 1.0}}"#.as_slice())]
    #[case::string(br#"{"dt": "1661870592"}"#.as_slice())]
    #[case::array(b"[]".as_slice())]
    fn missing_or_mistyped_timestamp_is_a_decode_failure(#[case] body: &[u8]) {
        assert!(decode_reading(body).is_err());
    }
}
