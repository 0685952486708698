//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{locations, observations};
use crate::domain::{
    Coordinates, CoordinatesValidationError, Location, LocationId, NewLocation, NewObservation,
    Observation, ObservationId,
};

/// Row struct for reading from the locations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub id: i64,
    pub name: String,
    pub tracking_enabled: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: Option<String>,
}

impl TryFrom<LocationRow> for Location {
    type Error = CoordinatesValidationError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LocationId::new(row.id),
            name: row.name,
            tracking_enabled: row.tracking_enabled,
            coordinates: Coordinates::new(row.latitude, row.longitude)?,
            country_code: row.country_code,
        })
    }
}

/// Insertable struct for creating location records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = locations)]
pub(crate) struct NewLocationRow<'a> {
    pub name: &'a str,
    pub tracking_enabled: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: Option<&'a str>,
}

impl<'a> From<&'a NewLocation> for NewLocationRow<'a> {
    fn from(location: &'a NewLocation) -> Self {
        Self {
            name: &location.name,
            tracking_enabled: location.tracking_enabled,
            latitude: location.coordinates.latitude(),
            longitude: location.coordinates.longitude(),
            country_code: location.country_code.as_deref(),
        }
    }
}

/// Changeset for the mutable part of a location.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = locations)]
pub(crate) struct LocationUpdate {
    pub tracking_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the observations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = observations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ObservationRow {
    pub id: i64,
    pub location_id: i64,
    pub observed_at: DateTime<Utc>,
    pub air_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub humidity: Option<i32>,
    pub condition_code: Option<String>,
}

impl From<ObservationRow> for Observation {
    fn from(row: ObservationRow) -> Self {
        Self {
            id: ObservationId::new(row.id),
            location_id: LocationId::new(row.location_id),
            observed_at: row.observed_at,
            air_temperature: row.air_temperature,
            wind_speed: row.wind_speed,
            humidity: row.humidity,
            condition_code: row.condition_code,
        }
    }
}

/// Insertable struct for appending observations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = observations)]
pub(crate) struct NewObservationRow<'a> {
    pub location_id: i64,
    pub observed_at: DateTime<Utc>,
    pub air_temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub humidity: Option<i32>,
    pub condition_code: Option<&'a str>,
}

impl<'a> From<&'a NewObservation> for NewObservationRow<'a> {
    fn from(observation: &'a NewObservation) -> Self {
        let reading = &observation.reading;
        Self {
            location_id: observation.location_id.as_i64(),
            observed_at: reading.observed_at,
            air_temperature: reading.air_temperature,
            wind_speed: reading.wind_speed,
            humidity: reading.humidity,
            condition_code: reading.condition_code.as_deref(),
        }
    }
}
