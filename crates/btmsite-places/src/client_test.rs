use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "btmsite-test/0.1", base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_joins_path_and_appends_key_last() {
    let client = test_client("https://maps.googleapis.com");
    let url = client
        .build_url(DETAILS_PATH, &[("place_id", "abc")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/place/details/json?place_id=abc&key=test-key"
    );
}

#[test]
fn build_url_strips_trailing_slash() {
    let client = test_client("https://maps.googleapis.com///");
    let url = client.build_url(GEOCODE_PATH, &[("address", "30301")]).unwrap();
    assert_eq!(
        url.as_str(),
        "https://maps.googleapis.com/maps/api/geocode/json?address=30301&key=test-key"
    );
}

#[test]
fn build_url_encodes_special_characters() {
    let client = test_client("https://maps.googleapis.com");
    let url = client
        .build_url(FIND_PLACE_PATH, &[("input", "Joe's Corner & Deli")])
        .unwrap();
    assert!(
        url.as_str().contains("Joe%27s+Corner+%26+Deli"),
        "input should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = PlacesClient::with_base_url("k", 30, "ua", "not a url");
    assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
}

#[test]
fn check_status_accepts_ok_and_zero_results() {
    assert!(check_status("OK", None, "ctx").is_ok());
    assert!(check_status("ZERO_RESULTS", None, "ctx").is_ok());
}

#[test]
fn check_status_maps_errors() {
    let err = check_status("REQUEST_DENIED", Some("The provided API key is invalid."), "ctx")
        .unwrap_err();
    assert!(matches!(err, PlacesError::Api { ref status, .. } if status == "REQUEST_DENIED"));
    assert!(err.to_string().contains("API key is invalid"));

    let err = check_status("NOT_FOUND", None, "details(place_id=x)").unwrap_err();
    assert!(matches!(err, PlacesError::NotFound(_)));
}
