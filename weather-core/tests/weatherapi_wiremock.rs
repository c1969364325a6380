//! Provider and controller behaviour against a mock WeatherAPI.com server.

use std::{sync::Arc, time::Duration};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

use cityweather_core::{
    Config, Coordinates, FetchError, FixedLocation, WeatherApiProvider, WeatherController,
    WeatherProvider, WeatherQuery,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const API_KEY: &str = "TEST_KEY";

fn london_body() -> serde_json::Value {
    serde_json::json!({
        "location": {
            "name": "London",
            "region": "City of London, Greater London",
            "country": "United Kingdom"
        },
        "current": {
            "temp_c": 18.0,
            "temp_f": 64.4,
            "condition": {"text": "Partly cloudy", "code": 1003},
            "wind_kph": 13.0,
            "humidity": 72,
            "cloud": 50
        }
    })
}

fn provider_for(server: &MockServer) -> WeatherApiProvider {
    WeatherApiProvider::new(API_KEY.to_string()).with_base_url(format!("{}/v1", server.uri()))
}

async fn mount_current(server: &MockServer, q: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", API_KEY))
        .and(query_param("q", q))
        .and(query_param("aqi", "no"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn city_lookup_decodes_snapshot() {
    let server = MockServer::start().await;
    mount_current(&server, "London", ResponseTemplate::new(200).set_body_json(london_body())).await;

    let snap = provider_for(&server)
        .current(&WeatherQuery::city("London").unwrap())
        .await
        .unwrap();

    assert_eq!(snap.name(), "London");
    assert_eq!(snap.current.humidity, Some(72));
    assert_eq!(
        snap.location.display_name(),
        "London, City of London, Greater London, United Kingdom"
    );
}

#[tokio::test]
async fn city_with_spaces_is_encoded() {
    let server = MockServer::start().await;
    let mut body = london_body();
    body["location"]["name"] = "New York".into();
    mount_current(&server, "New York", ResponseTemplate::new(200).set_body_json(body)).await;

    let snap = provider_for(&server)
        .current(&WeatherQuery::city("New York").unwrap())
        .await
        .unwrap();

    assert_eq!(snap.name(), "New York");
}

#[tokio::test]
async fn coordinate_lookup_sends_literal_pair() {
    let server = MockServer::start().await;
    let ok = ResponseTemplate::new(200).set_body_json(london_body());
    mount_current(&server, "51.5,-0.12", ok).await;

    let query = WeatherQuery::coordinates(Coordinates::new(51.5, -0.12)).unwrap();
    let snap = provider_for(&server).current(&query).await.unwrap();

    assert_eq!(snap.name(), "London");
}

#[tokio::test]
async fn non_200_is_not_found_for_both_query_kinds() {
    let server = MockServer::start().await;
    let rejected = ResponseTemplate::new(400).set_body_json(serde_json::json!({
        "error": {"code": 1006, "message": "No matching location found."}
    }));
    mount_current(&server, "Atlantis", rejected.clone()).await;
    mount_current(&server, "0,0", rejected).await;

    let provider = provider_for(&server);

    let err = provider.current(&WeatherQuery::city("Atlantis").unwrap()).await.unwrap_err();
    assert_eq!(err, FetchError::NotFound { status: 400 });
    assert_eq!(err.to_string(), "Weather data not found");

    let query = WeatherQuery::coordinates(Coordinates::new(0.0, 0.0)).unwrap();
    let err = provider.current(&query).await.unwrap_err();
    assert_eq!(err, FetchError::NotFound { status: 400 });
}

#[tokio::test]
async fn non_200_with_truncated_body_is_still_not_found() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    // Promises 100 body bytes, sends 7, then hangs up.
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 2048];
        let _ = socket.read(&mut request).await;
        let head = "HTTP/1.1 503 Service Unavailable\r\ncontent-length: 100\r\n\r\npartial";
        let _ = socket.write_all(head.as_bytes()).await;
    });

    let provider =
        WeatherApiProvider::new(API_KEY.to_string()).with_base_url(format!("http://{addr}/v1"));
    let err = provider.current(&WeatherQuery::city("London").unwrap()).await.unwrap_err();

    assert_eq!(err, FetchError::NotFound { status: 503 });
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    let html = ResponseTemplate::new(200).set_body_string("<html>oops</html>");
    mount_current(&server, "London", html).await;

    let err = provider_for(&server)
        .current(&WeatherQuery::city("London").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
    assert_eq!(err.to_string(), "Failed to decode weather data");
}

#[tokio::test]
async fn unreachable_host_is_transport_error_without_key() {
    let provider =
        WeatherApiProvider::new(API_KEY.to_string()).with_base_url("http://127.0.0.1:1/v1");

    let err = provider.current(&WeatherQuery::city("London").unwrap()).await.unwrap_err();

    match err {
        FetchError::Transport(msg) => {
            assert!(!msg.is_empty());
            assert!(!msg.contains(API_KEY));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn configured_timeout_applies() {
    let server = MockServer::start().await;
    mount_current(
        &server,
        "London",
        ResponseTemplate::new(200).set_body_json(london_body()).set_delay(Duration::from_secs(3)),
    )
    .await;

    let cfg = Config {
        api_key: Some(API_KEY.to_string()),
        base_url: Some(format!("{}/v1", server.uri())),
        timeout_secs: Some(1),
        ..Default::default()
    };
    let provider = WeatherApiProvider::from_config(&cfg).unwrap();

    let err = provider.current(&WeatherQuery::city("London").unwrap()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn controller_end_to_end() {
    let server = MockServer::start().await;
    mount_current(&server, "London", ResponseTemplate::new(200).set_body_json(london_body())).await;
    let ok = ResponseTemplate::new(200).set_body_json(london_body());
    mount_current(&server, "51.5,-0.12", ok).await;
    mount_current(&server, "Nowhere", ResponseTemplate::new(400)).await;

    let location = FixedLocation::new(Some(Coordinates::new(51.5, -0.12)));
    let ctl = WeatherController::new(Arc::new(provider_for(&server)), Arc::new(location));

    ctl.fetch_weather_by_city("London").await;
    ctl.use_current_location().await;
    ctl.fetch_weather_by_city("Nowhere").await;

    let state = ctl.state();
    let current = state.current_weather.as_ref().unwrap();
    assert_eq!(current.name(), "London");
    assert!((current.current.temperature_fahrenheit() - 64.4).abs() < 1e-9);
    assert_eq!(state.saved_cities.len(), 1);
    assert_eq!(state.error_message.as_deref(), Some("Weather data not found"));
    assert!(!state.is_loading);
}

#[tokio::test]
async fn from_config_requires_api_key() {
    let err = WeatherApiProvider::from_config(&Config::default()).unwrap_err();
    assert!(err.to_string().contains("No WeatherAPI.com key configured"));
}
