//! Behaviour coverage for resolving and toggling tracked locations.

use super::*;
use crate::domain::ports::{
    GeocodingSourceError, MockGeocodingSource, MockLocationRepository,
};
use crate::domain::{CityNameValidationError, Coordinates, Error, ErrorCode};
use rstest::{fixture, rstest};

fn tallinn_coordinates() -> Coordinates {
    Coordinates::new(59.4372155, 24.7453688).expect("valid coordinates")
}

#[fixture]
fn tallinn_candidate() -> GeocodingCandidate {
    GeocodingCandidate {
        name: "Tallinn".to_owned(),
        coordinates: tallinn_coordinates(),
        country_code: Some("EE".to_owned()),
    }
}

fn stored_tallinn(tracking_enabled: bool) -> Location {
    Location {
        id: LocationId::new(11),
        name: "Tallinn".to_owned(),
        tracking_enabled,
        coordinates: tallinn_coordinates(),
        country_code: Some("EE".to_owned()),
    }
}

fn geocoder_returning(candidates: Vec<GeocodingCandidate>) -> MockGeocodingSource {
    let mut geocoder = MockGeocodingSource::new();
    geocoder
        .expect_lookup()
        .times(1)
        .returning(move |_| Ok(candidates.clone()));
    geocoder
}

fn service(geocoder: MockGeocodingSource, repo: MockLocationRepository) -> LocationTrackingService {
    LocationTrackingService::new(Arc::new(geocoder), Arc::new(repo))
}

#[rstest]
#[case::empty("", CityNameValidationError::Blank)]
#[case::blank("   ", CityNameValidationError::Blank)]
#[case::digit("Tallinn2", CityNameValidationError::ContainsDigit)]
#[case::only_digits("42", CityNameValidationError::ContainsDigit)]
#[tokio::test]
async fn malformed_names_fail_before_any_io(
    #[case] raw: &str,
    #[case] expected: CityNameValidationError,
) {
    let mut geocoder = MockGeocodingSource::new();
    geocoder.expect_lookup().never();
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name().never();
    repo.expect_insert().never();
    repo.expect_save().never();

    let error = service(geocoder, repo)
        .track(raw)
        .await
        .expect_err("name must be rejected");

    assert_eq!(error, LocationTrackingError::InvalidName(expected));
}

#[rstest]
#[tokio::test]
async fn new_name_is_inserted_with_canonical_spelling(tallinn_candidate: GeocodingCandidate) {
    let mut geocoder = MockGeocodingSource::new();
    geocoder
        .expect_lookup()
        .withf(|name| name.as_str() == "tallinn")
        .times(1)
        .returning(move |_| Ok(vec![tallinn_candidate.clone()]));
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name()
        .withf(|name| name == "Tallinn")
        .times(1)
        .returning(|_| Ok(None));
    repo.expect_insert()
        .withf(|new| new.name == "Tallinn" && new.tracking_enabled)
        .times(1)
        .returning(|new| Ok(new.with_id(LocationId::new(11))));
    repo.expect_save().never();

    let location = service(geocoder, repo)
        .track("tallinn")
        .await
        .expect("tracking succeeds");

    assert_eq!(location.name, "Tallinn");
    assert_eq!(location.coordinates.latitude(), 59.4372155);
    assert_eq!(location.coordinates.longitude(), 24.7453688);
    assert!(location.tracking_enabled);
}

#[rstest]
#[tokio::test]
async fn only_the_first_candidate_is_used(tallinn_candidate: GeocodingCandidate) {
    let other = GeocodingCandidate {
        name: "Tallinna".to_owned(),
        coordinates: Coordinates::new(1.0, 1.0).expect("valid"),
        country_code: None,
    };
    let geocoder = geocoder_returning(vec![tallinn_candidate, other]);
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name()
        .withf(|name| name == "Tallinn")
        .returning(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .returning(|new| Ok(new.with_id(LocationId::new(1))));

    let location = service(geocoder, repo)
        .track("tallinn")
        .await
        .expect("tracking succeeds");
    assert_eq!(location.name, "Tallinn");
}

#[rstest]
#[tokio::test]
async fn tracked_location_is_rejected_without_writes(tallinn_candidate: GeocodingCandidate) {
    let geocoder = geocoder_returning(vec![tallinn_candidate]);
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name()
        .times(1)
        .returning(|_| Ok(Some(stored_tallinn(true))));
    repo.expect_insert().never();
    repo.expect_save().never();

    let error = service(geocoder, repo)
        .track("Tallinn")
        .await
        .expect_err("already tracked");

    assert_eq!(
        error,
        LocationTrackingError::AlreadyTracked {
            name: "Tallinn".to_owned()
        }
    );
}

#[rstest]
#[tokio::test]
async fn disabled_location_is_re_enabled_with_one_save(tallinn_candidate: GeocodingCandidate) {
    let geocoder = geocoder_returning(vec![tallinn_candidate]);
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name()
        .times(1)
        .returning(|_| Ok(Some(stored_tallinn(false))));
    repo.expect_insert().never();
    repo.expect_save()
        .withf(|location| location.id == LocationId::new(11) && location.tracking_enabled)
        .times(1)
        .returning(|_| Ok(()));

    let location = service(geocoder, repo)
        .track("tallinn")
        .await
        .expect("re-enable succeeds");

    assert_eq!(location.id, LocationId::new(11));
    assert!(location.tracking_enabled);
}

#[rstest]
#[tokio::test]
async fn empty_candidate_list_is_not_found() {
    let geocoder = geocoder_returning(Vec::new());
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name().never();

    let error = service(geocoder, repo)
        .track("Atlantis")
        .await
        .expect_err("no candidates");

    assert_eq!(
        error,
        LocationTrackingError::LocationNotFound(LocationLookup::Name("Atlantis".to_owned()))
    );
}

#[rstest]
#[case::transport(GeocodingSourceError::transport("connection refused"))]
#[case::timeout(GeocodingSourceError::timeout("deadline elapsed"))]
#[case::decode(GeocodingSourceError::decode("expected a JSON array"))]
#[case::status(GeocodingSourceError::status("status 401"))]
#[tokio::test]
async fn geocoder_failures_become_resolution_failures(#[case] failure: GeocodingSourceError) {
    let mut geocoder = MockGeocodingSource::new();
    let returned = failure.clone();
    geocoder
        .expect_lookup()
        .times(1)
        .returning(move |_| Err(returned.clone()));
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name().never();

    let error = service(geocoder, repo)
        .track("Tallinn")
        .await
        .expect_err("resolution fails");

    assert_eq!(
        error,
        LocationTrackingError::ResolutionFailed {
            name: "Tallinn".to_owned(),
            message: failure.to_string(),
        }
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_insert_is_treated_as_already_tracked(tallinn_candidate: GeocodingCandidate) {
    let geocoder = geocoder_returning(vec![tallinn_candidate]);
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name().returning(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .returning(|new| Err(LocationRepositoryError::duplicate_name(new.name)));

    let error = service(geocoder, repo)
        .track("tallinn")
        .await
        .expect_err("concurrent insert loses");

    assert_eq!(
        error,
        LocationTrackingError::AlreadyTracked {
            name: "Tallinn".to_owned()
        }
    );
}

#[rstest]
#[tokio::test]
async fn store_failures_propagate_as_persistence_errors(tallinn_candidate: GeocodingCandidate) {
    let geocoder = geocoder_returning(vec![tallinn_candidate]);
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_name()
        .returning(|_| Err(LocationRepositoryError::connection("pool exhausted")));

    let error = service(geocoder, repo)
        .track("tallinn")
        .await
        .expect_err("store down");

    assert!(matches!(error, LocationTrackingError::Persistence { .. }));
    assert_eq!(Error::from(error).code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn untrack_disables_and_saves_once() {
    let mut geocoder = MockGeocodingSource::new();
    geocoder.expect_lookup().never();
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_id()
        .withf(|id| *id == LocationId::new(11))
        .times(1)
        .returning(|_| Ok(Some(stored_tallinn(true))));
    repo.expect_save()
        .withf(|location| !location.tracking_enabled)
        .times(1)
        .returning(|_| Ok(()));

    let location = service(geocoder, repo)
        .untrack(LocationId::new(11))
        .await
        .expect("disable succeeds");

    assert!(!location.tracking_enabled);
}

#[rstest]
#[tokio::test]
async fn untrack_twice_fails_without_writes() {
    let geocoder = MockGeocodingSource::new();
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_id()
        .returning(|_| Ok(Some(stored_tallinn(false))));
    repo.expect_save().never();

    let error = service(geocoder, repo)
        .untrack(LocationId::new(11))
        .await
        .expect_err("already untracked");

    assert_eq!(
        error,
        LocationTrackingError::AlreadyUntracked {
            name: "Tallinn".to_owned()
        }
    );
}

#[rstest]
#[tokio::test]
async fn untrack_unknown_id_is_not_found() {
    let geocoder = MockGeocodingSource::new();
    let mut repo = MockLocationRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_save().never();

    let error = service(geocoder, repo)
        .untrack(LocationId::new(404))
        .await
        .expect_err("unknown id");

    assert_eq!(
        error,
        LocationTrackingError::LocationNotFound(LocationLookup::Id(LocationId::new(404)))
    );
}

#[rstest]
#[case::invalid(
    LocationTrackingError::InvalidName(CityNameValidationError::Blank),
    ErrorCode::InvalidRequest
)]
#[case::missing(
    LocationTrackingError::LocationNotFound(LocationLookup::Id(LocationId::new(1))),
    ErrorCode::NotFound
)]
#[case::resolution(
    LocationTrackingError::ResolutionFailed { name: "x".to_owned(), message: "y".to_owned() },
    ErrorCode::FailedDependency
)]
#[case::tracked(
    LocationTrackingError::AlreadyTracked { name: "x".to_owned() },
    ErrorCode::Conflict
)]
#[case::untracked(
    LocationTrackingError::AlreadyUntracked { name: "x".to_owned() },
    ErrorCode::Conflict
)]
fn tracking_errors_map_to_domain_codes(
    #[case] error: LocationTrackingError,
    #[case] expected: ErrorCode,
) {
    assert_eq!(Error::from(error).code(), expected);
}
