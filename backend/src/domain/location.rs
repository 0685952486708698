//! Tracked locations and the values used to resolve them.
//!
//! A location is created the first time a city name resolves through the
//! geocoding provider and is never deleted; tracking is toggled instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque store-assigned identifier for a [`Location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(i64);

impl LocationId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for [`Coordinates`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinatesValidationError {
    /// Latitude or longitude was NaN or infinite.
    #[error("coordinates must be finite")]
    NonFinite,
    /// Latitude outside `[-90, 90]`.
    #[error("latitude {0} must be within [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude outside `[-180, 180]`.
    #[error("longitude {0} must be within [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// WGS84 latitude/longitude pair.
///
/// # Examples
/// ```
/// use weather_backend::domain::Coordinates;
///
/// let tallinn = Coordinates::new(59.4372155, 24.7453688).expect("valid coordinates");
/// assert_eq!(tallinn.latitude(), 59.4372155);
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatesValidationError`] for non-finite or out of range
    /// values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesValidationError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinatesValidationError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesValidationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesValidationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Validation failures for a raw city name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CityNameValidationError {
    /// The name was empty or whitespace only.
    #[error("city name must not be blank")]
    Blank,
    /// The name contained a digit.
    #[error("city name must not contain digits")]
    ContainsDigit,
}

/// Free-text city name as typed by a caller, prior to geocoding.
///
/// Only basic formatting is checked here; the canonical spelling comes from
/// the provider.
///
/// # Examples
/// ```
/// use weather_backend::domain::CityName;
///
/// assert!(CityName::new("tallinn").is_ok());
/// assert!(CityName::new("  ").is_err());
/// assert!(CityName::new("District 9").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityName(String);

impl CityName {
    /// Validate a raw name.
    ///
    /// # Errors
    ///
    /// Returns [`CityNameValidationError`] when the name is blank or contains
    /// a digit in any script.
    pub fn new(raw: impl Into<String>) -> Result<Self, CityNameValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CityNameValidationError::Blank);
        }
        if raw.chars().any(char::is_numeric) {
            return Err(CityNameValidationError::ContainsDigit);
        }
        Ok(Self(raw))
    }

    /// Borrow the raw name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted, canonically named location.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// Store-assigned identity.
    pub id: LocationId,
    /// Provider-normalised name, unique across all locations.
    pub name: String,
    /// Whether the batch import includes this location.
    pub tracking_enabled: bool,
    /// Position used for weather lookups.
    pub coordinates: Coordinates,
    /// ISO 3166 alpha-2 country code reported by the geocoder.
    pub country_code: Option<String>,
}

/// Location awaiting its first insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    /// Provider-normalised name.
    pub name: String,
    /// Initial tracking flag.
    pub tracking_enabled: bool,
    /// Position used for weather lookups.
    pub coordinates: Coordinates,
    /// ISO 3166 alpha-2 country code reported by the geocoder.
    pub country_code: Option<String>,
}

impl NewLocation {
    /// Attach a store-assigned identifier.
    pub fn with_id(self, id: LocationId) -> Location {
        Location {
            id,
            name: self.name,
            tracking_enabled: self.tracking_enabled,
            coordinates: self.coordinates,
            country_code: self.country_code,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Validation coverage for location value types.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::tab("\t")]
    fn blank_names_are_rejected(#[case] raw: &str) {
        assert_eq!(CityName::new(raw), Err(CityNameValidationError::Blank));
    }

    #[rstest]
    #[case::ascii("Tallinn1")]
    #[case::only_digits("123")]
    #[case::arabic_indic("Cairo\u{0663}")]
    fn names_with_digits_are_rejected(#[case] raw: &str) {
        assert_eq!(
            CityName::new(raw),
            Err(CityNameValidationError::ContainsDigit)
        );
    }

    #[rstest]
    #[case::lowercase("tallinn")]
    #[case::accented("Tartu Ülikool")]
    #[case::hyphenated("Saint-Étienne")]
    fn alphabetic_names_are_accepted(#[case] raw: &str) {
        let name = CityName::new(raw).expect("name should validate");
        assert_eq!(name.as_str(), raw);
    }

    #[rstest]
    #[case::nan(f64::NAN, 0.0)]
    #[case::infinite(0.0, f64::INFINITY)]
    fn non_finite_coordinates_are_rejected(#[case] lat: f64, #[case] lon: f64) {
        assert_eq!(
            Coordinates::new(lat, lon),
            Err(CoordinatesValidationError::NonFinite)
        );
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(matches!(
            Coordinates::new(-90.5, 0.0),
            Err(CoordinatesValidationError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            Coordinates::new(0.0, 180.5),
            Err(CoordinatesValidationError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn new_location_keeps_fields_when_assigned_id() {
        let coordinates = Coordinates::new(59.4372155, 24.7453688).expect("valid");
        let location = NewLocation {
            name: "Tallinn".to_owned(),
            tracking_enabled: true,
            coordinates,
            country_code: Some("EE".to_owned()),
        }
        .with_id(LocationId::new(7));

        assert_eq!(location.id.as_i64(), 7);
        assert_eq!(location.name, "Tallinn");
        assert!(location.tracking_enabled);
        assert_eq!(location.coordinates, coordinates);
    }
}
