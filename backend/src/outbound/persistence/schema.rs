//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Cities known to the service, tracked or not.
    ///
    /// `name` carries a unique constraint so concurrent resolutions of the
    /// same city cannot create two rows.
    locations (id) {
        id -> Int8,
        name -> Varchar,
        tracking_enabled -> Bool,
        latitude -> Float8,
        longitude -> Float8,
        country_code -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only weather observations.
    observations (id) {
        id -> Int8,
        location_id -> Int8,
        observed_at -> Timestamptz,
        air_temperature -> Nullable<Float8>,
        wind_speed -> Nullable<Float8>,
        humidity -> Nullable<Int4>,
        condition_code -> Nullable<Text>,
        recorded_at -> Timestamptz,
    }
}

diesel::joinable!(observations -> locations (location_id));

diesel::allow_tables_to_appear_in_same_query!(locations, observations);
