//! OpenWeather adapters exercised against a local stub provider.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;
use url::Url;

use weather_backend::domain::ports::{
    GeocodingSource, GeocodingSourceError, WeatherSource, WeatherSourceError,
};
use weather_backend::domain::{CityName, Coordinates};
use weather_backend::outbound::openweather::{
    OpenWeatherCurrentSource, OpenWeatherGeocodingSource,
};

const API_KEY: &str = "test-key-123";
const TIMEOUT: Duration = Duration::from_millis(300);

type Recorded = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn geocode(
    query: web::Query<HashMap<String, String>>,
    recorded: web::Data<Recorded>,
) -> HttpResponse {
    recorded
        .lock()
        .expect("recorder mutex")
        .push(query.0.clone());
    if query.get("appid").map(String::as_str) != Some(API_KEY) {
        return HttpResponse::Unauthorized()
            .json(json!({ "cod": 401, "message": "Invalid API key." }));
    }
    match query.get("q").map(String::as_str) {
        Some("tallinn") => HttpResponse::Ok().json(json!([{
            "name": "Tallinn",
            "local_names": { "et": "Tallinn" },
            "lat": 59.4372155,
            "lon": 24.7453688,
            "country": "EE",
        }])),
        Some("slow") => {
            actix_web::rt::time::sleep(Duration::from_secs(2)).await;
            HttpResponse::Ok().json(json!([]))
        }
        Some("garbled") => HttpResponse::Ok().body("<html>maintenance</html>"),
        Some("overloaded") => HttpResponse::ServiceUnavailable().body("try again later"),
        _ => HttpResponse::Ok().json(json!([])),
    }
}

async fn current(
    query: web::Query<HashMap<String, String>>,
    recorded: web::Data<Recorded>,
) -> HttpResponse {
    recorded
        .lock()
        .expect("recorder mutex")
        .push(query.0.clone());
    match query.get("lat").map(String::as_str) {
        Some("0") => HttpResponse::Ok().json(json!({ "main": { "temp": 1.0 } })),
        Some("1") => HttpResponse::GatewayTimeout().finish(),
        _ => HttpResponse::Ok().json(json!({
            "dt": 1_661_870_592,
            "main": { "temp": 29.48, "humidity": 64 },
            "wind": { "speed": 3.62 },
            "weather": [{ "id": 800, "icon": "01d" }],
        })),
    }
}

struct StubProvider {
    addr: SocketAddr,
    handle: ServerHandle,
    recorded: Recorded,
}

impl StubProvider {
    async fn start() -> Self {
        let recorded: Recorded = Arc::default();
        let data = web::Data::new(recorded.clone());
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/geo/1.0/direct", web::get().to(geocode))
                .route("/data/2.5/weather", web::get().to(current))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind stub provider");
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self {
            addr,
            handle,
            recorded,
        }
    }

    fn url(&self, path: &str) -> Url {
        Url::parse(&format!("http://{}{path}", self.addr)).expect("stub url")
    }

    fn geocoder(&self, api_key: &str) -> OpenWeatherGeocodingSource {
        OpenWeatherGeocodingSource::new(self.url("/geo/1.0/direct"), api_key, TIMEOUT)
            .expect("client builds")
    }

    fn weather(&self) -> OpenWeatherCurrentSource {
        OpenWeatherCurrentSource::new(self.url("/data/2.5/weather"), API_KEY, TIMEOUT)
            .expect("client builds")
    }

    fn last_query(&self) -> HashMap<String, String> {
        self.recorded
            .lock()
            .expect("recorder mutex")
            .last()
            .cloned()
            .expect("a request was recorded")
    }

    async fn stop(self) {
        self.handle.stop(false).await;
    }
}

fn city(name: &str) -> CityName {
    CityName::new(name).expect("valid city name")
}

#[actix_web::test]
async fn geocoder_sends_the_documented_query_and_decodes_the_match() {
    let stub = StubProvider::start().await;

    let candidates = stub
        .geocoder(API_KEY)
        .lookup(&city("tallinn"))
        .await
        .expect("lookup succeeds");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].name, "Tallinn");
    assert_eq!(candidates[0].country_code.as_deref(), Some("EE"));
    assert_eq!(
        candidates[0].coordinates,
        Coordinates::new(59.4372155, 24.7453688).expect("valid")
    );

    let query = stub.last_query();
    assert_eq!(query.get("q").map(String::as_str), Some("tallinn"));
    assert_eq!(query.get("limit").map(String::as_str), Some("1"));
    assert_eq!(query.get("appid").map(String::as_str), Some(API_KEY));
    stub.stop().await;
}

#[actix_web::test]
async fn geocoder_reports_no_match_as_empty() {
    let stub = StubProvider::start().await;

    let candidates = stub
        .geocoder(API_KEY)
        .lookup(&city("Atlantis"))
        .await
        .expect("lookup succeeds");

    assert!(candidates.is_empty());
    stub.stop().await;
}

#[rstest]
#[case::overloaded("overloaded")]
#[case::garbled("garbled")]
#[case::slow("slow")]
#[actix_web::test]
async fn geocoder_failures_are_classified(#[case] query: &str) {
    let stub = StubProvider::start().await;

    let error = stub
        .geocoder(API_KEY)
        .lookup(&city(query))
        .await
        .expect_err("lookup fails");

    match query {
        "overloaded" => assert!(
            matches!(&error, GeocodingSourceError::Status { message } if message.contains("503") && message.contains("try again later")),
            "unexpected error: {error:?}"
        ),
        "garbled" => assert!(
            matches!(error, GeocodingSourceError::Decode { .. }),
            "unexpected error: {error:?}"
        ),
        _ => assert!(
            matches!(error, GeocodingSourceError::Timeout { .. }),
            "unexpected error: {error:?}"
        ),
    }
    stub.stop().await;
}

#[actix_web::test]
async fn rejected_key_never_leaks_into_the_error() {
    let stub = StubProvider::start().await;

    let error = stub
        .geocoder("wrong-secret")
        .lookup(&city("tallinn"))
        .await
        .expect_err("key is rejected");

    assert!(matches!(error, GeocodingSourceError::Status { .. }));
    assert!(error.to_string().contains("401"));
    assert!(!error.to_string().contains("wrong-secret"));
    stub.stop().await;
}

#[actix_web::test]
async fn weather_source_requests_metric_units_and_decodes_readings() {
    let stub = StubProvider::start().await;

    let reading = stub
        .weather()
        .current(&Coordinates::new(59.4372155, 24.7453688).expect("valid"))
        .await
        .expect("reading decodes");

    assert_eq!(
        reading.observed_at,
        Utc.timestamp_opt(1_661_870_592, 0).single().expect("valid")
    );
    assert_eq!(reading.air_temperature, Some(29.48));
    assert_eq!(reading.humidity, Some(64));
    assert_eq!(reading.wind_speed, Some(3.62));
    assert_eq!(reading.condition_code.as_deref(), Some("01d"));

    let query = stub.last_query();
    assert_eq!(query.get("units").map(String::as_str), Some("metric"));
    assert_eq!(query.get("lat").map(String::as_str), Some("59.4372155"));
    assert_eq!(query.get("lon").map(String::as_str), Some("24.7453688"));
    assert_eq!(query.get("appid").map(String::as_str), Some(API_KEY));
    stub.stop().await;
}

#[rstest]
#[case::missing_timestamp(0.0)]
#[case::gateway_timeout(1.0)]
#[actix_web::test]
async fn weather_source_failures_are_classified(#[case] latitude: f64) {
    let stub = StubProvider::start().await;

    let error = stub
        .weather()
        .current(&Coordinates::new(latitude, 0.0).expect("valid"))
        .await
        .expect_err("reading fails");

    if latitude == 0.0 {
        assert!(matches!(error, WeatherSourceError::Decode { .. }), "{error:?}");
    } else {
        assert!(matches!(error, WeatherSourceError::Timeout { .. }), "{error:?}");
    }
    stub.stop().await;
}
