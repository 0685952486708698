//! OpenWeather outbound adapters.
//!
//! Thin HTTP implementations of the `GeocodingSource` and `WeatherSource`
//! ports. The API key travels as the `appid` query parameter and is never
//! included in error messages.

mod dto;
mod geocoding;
mod http;
mod weather;

pub use geocoding::OpenWeatherGeocodingSource;
pub use weather::OpenWeatherCurrentSource;
