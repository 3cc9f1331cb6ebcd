//! End-to-end flow: startup, typing, picking a city, restarting.

use forecast_core::{
    FetchOutcome, FilePreferenceStore, ForecastSession, PreferenceStore, Screen, SearchController,
    SharedState, WeatherProvider, provider::weatherapi::WeatherApiProvider, store::CITY_KEY,
};
use std::{sync::Arc, time::Duration};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn forecast_for(city: &str, country: &str) -> serde_json::Value {
    serde_json::json!({
        "location": { "name": city, "country": country },
        "current": {
            "temp_c": 21.0,
            "condition": { "text": "Partly cloudy" },
            "wind_kph": 14.4,
            "humidity": 60
        },
        "forecast": { "forecastday": [
            { "date": "2024-03-04", "day": { "avgtemp_c": 19.5, "condition": { "text": "Mist" } },
              "astro": { "sunrise": "06:40 AM" } }
        ]}
    })
}

async fn mount_forecast(server: &MockServer, city: &str, country: &str) {
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .and(query_param("q", city))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_for(city, country)))
        .mount(server)
        .await;
}

fn build_session(
    server: &MockServer,
    store: Arc<FilePreferenceStore>,
) -> ForecastSession {
    let provider: Arc<dyn WeatherProvider> = Arc::new(
        WeatherApiProvider::builder("KEY")
            .base_url(&server.uri())
            .build()
            .expect("client builds"),
    );
    let search = Arc::new(SearchController::with_quiet_period(
        Arc::clone(&provider),
        SharedState::new(),
        Duration::from_millis(50),
    ));
    ForecastSession::new(provider, store, search)
}

#[tokio::test]
async fn pick_a_city_and_get_it_back_after_restart() {
    let server = MockServer::start().await;
    mount_forecast(&server, "Jaipur", "India").await;
    mount_forecast(&server, "London", "United Kingdom").await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "Lond"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "London", "region": "City of London, Greater London", "country": "United Kingdom" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(FilePreferenceStore::new(dir.path().join("prefs.json")));

    let session = build_session(&server, Arc::clone(&store));
    assert_eq!(session.initialize().await, FetchOutcome::Applied);
    match Screen::from_state(&session.state().snapshot()) {
        Screen::Forecast(view) => assert_eq!(view.headline(), "Jaipur, India"),
        other => panic!("expected forecast, got {other:?}"),
    }

    session.search().open();
    for text in ["L", "Lo", "Lon", "Lond"] {
        session.search().on_query_change(text);
    }
    tokio::time::sleep(Duration::from_millis(500)).await;

    let candidates = session.state().snapshot().candidates().to_vec();
    assert_eq!(candidates.len(), 1);

    assert_eq!(session.select_location(&candidates[0]).await, FetchOutcome::Applied);
    let state = session.state().snapshot();
    assert!(!state.search_open());
    assert!(state.candidates().is_empty());
    assert_eq!(state.current().map(|s| s.location.name.as_str()), Some("London"));
    assert_eq!(store.get(CITY_KEY).await.expect("read").as_deref(), Some("London"));

    let restarted = build_session(&server, Arc::new(FilePreferenceStore::new(store.path())));
    restarted.initialize().await;
    assert_eq!(
        restarted.state().snapshot().current().map(|s| s.location.name.clone()),
        Some("London".to_string())
    );
}

#[tokio::test]
async fn failed_startup_shows_empty_screen_with_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "code": 2006, "message": "API key is invalid." }
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let session =
        build_session(&server, Arc::new(FilePreferenceStore::new(dir.path().join("prefs.json"))));

    let outcome = session.initialize().await;

    assert!(matches!(outcome, FetchOutcome::Failed(_)));
    match Screen::from_state(&session.state().snapshot()) {
        Screen::Empty { error } => {
            assert!(error.is_some_and(|e| e.contains("API key is invalid.")));
        }
        other => panic!("expected empty screen, got {other:?}"),
    }
}
