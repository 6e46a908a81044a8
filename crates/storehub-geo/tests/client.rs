//! Integration tests for `TencentGeocoder` using wiremock HTTP mocks.

use storehub_core::{CollaboratorError, GeocodingProvider};
use storehub_geo::{GeoError, TencentGeocoder};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TencentGeocoder {
    TencentGeocoder::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn geocode_returns_location() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "status": 0,
        "message": "query ok",
        "result": {
            "title": "88 Century Ave",
            "location": { "lng": 121.506_377, "lat": 31.245_105 },
            "reliability": 7
        }
    });

    Mock::given(method("GET"))
        .and(path("/ws/geocoder/v1/"))
        .and(query_param("address", "88 Century Ave"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let location = client
        .geocode("88 Century Ave")
        .await
        .expect("should parse location");

    assert!((location.lat - 31.245_105).abs() < f64::EPSILON);
    assert!((location.lng - 121.506_377).abs() < f64::EPSILON);
}

#[tokio::test]
async fn provider_failure_status_is_surfaced() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "status": 311, "message": "key format error" });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode("anywhere")
        .await
        .expect_err("provider failure should error");

    match err {
        GeoError::Provider { status, message } => {
            assert_eq!(status, 311);
            assert_eq!(message, "key format error");
        }
        other => panic!("expected GeoError::Provider, got: {other:?}"),
    }
}

#[tokio::test]
async fn success_without_result_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": 0 })),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode("nowhere")
        .await
        .expect_err("missing location should error");
    assert!(matches!(err, GeoError::Provider { status: 0, .. }));
}

#[tokio::test]
async fn non_2xx_status_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode("anywhere")
        .await
        .expect_err("503 should error");
    assert!(
        matches!(err, GeoError::UnexpectedStatus(status) if status.as_u16() == 503),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .geocode("anywhere")
        .await
        .expect_err("html body should error");
    assert!(matches!(err, GeoError::Deserialize { .. }));
}

#[tokio::test]
async fn provider_trait_wraps_errors_as_geocoding_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .resolve("anywhere")
        .await
        .expect_err("500 should error");
    assert!(matches!(err, CollaboratorError::Geocoding(_)));
}
