//! Scriptable provider and store doubles shared by the unit tests.

use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{collections::HashMap, time::Duration};

use crate::{
    model::{
        Astro, Condition, Current, DaySummary, Forecast, ForecastDay, ForecastSnapshot,
        LocationCandidate, Place,
    },
    provider::{ApiError, WeatherProvider},
    store::PreferenceStore,
};

pub(crate) fn snapshot_for(city: &str) -> ForecastSnapshot {
    ForecastSnapshot {
        location: Place {
            name: city.to_string(),
            country: "India".to_string(),
            region: None,
            localtime: None,
        },
        current: Current {
            temp_c: 31.0,
            condition: Condition::with_text("Sunny"),
            wind_kph: 9.4,
            humidity: 22,
            feelslike_c: None,
        },
        forecast: Forecast {
            forecastday: vec![ForecastDay {
                date: "2024-03-04".to_string(),
                day: DaySummary {
                    avgtemp_c: 27.1,
                    maxtemp_c: None,
                    mintemp_c: None,
                    condition: Condition::with_text("Partly cloudy"),
                },
                astro: Astro { sunrise: Some("06:51 AM".to_string()), sunset: None },
            }],
        },
    }
}

#[derive(Debug, Clone)]
struct Scripted<T> {
    delay: Duration,
    result: Result<T, ApiError>,
}

/// Answers immediately with a snapshot named after the requested city and a
/// single candidate named after the query, unless scripted otherwise.
#[derive(Debug, Default)]
pub(crate) struct StubProvider {
    forecasts: Mutex<HashMap<String, Scripted<ForecastSnapshot>>>,
    searches: Mutex<HashMap<String, Scripted<Vec<LocationCandidate>>>>,
    forecast_calls: Mutex<Vec<(String, u8)>>,
    search_calls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn forecast(
        self,
        city: &str,
        delay: Duration,
        result: Result<ForecastSnapshot, ApiError>,
    ) -> Self {
        self.forecasts.lock().insert(city.to_string(), Scripted { delay, result });
        self
    }

    pub(crate) fn search(
        self,
        query: &str,
        delay: Duration,
        result: Result<Vec<LocationCandidate>, ApiError>,
    ) -> Self {
        self.searches.lock().insert(query.to_string(), Scripted { delay, result });
        self
    }

    pub(crate) fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().clone()
    }

    pub(crate) fn forecast_calls(&self) -> Vec<(String, u8)> {
        self.forecast_calls.lock().clone()
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    async fn resolve_locations(&self, query: &str) -> Result<Vec<LocationCandidate>, ApiError> {
        self.search_calls.lock().push(query.to_string());
        let scripted = self.searches.lock().get(query).cloned();
        match scripted {
            Some(Scripted { delay, result }) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(vec![LocationCandidate::new(query, "India")]),
        }
    }

    async fn fetch_forecast(&self, city: &str, days: u8) -> Result<ForecastSnapshot, ApiError> {
        self.forecast_calls.lock().push((city.to_string(), days));
        let scripted = self.forecasts.lock().get(city).cloned();
        match scripted {
            Some(Scripted { delay, result }) => {
                tokio::time::sleep(delay).await;
                result
            }
            None => Ok(snapshot_for(city)),
        }
    }
}

/// Store whose every call fails.
#[derive(Debug, Default)]
pub(crate) struct BrokenStore;

#[async_trait]
impl PreferenceStore for BrokenStore {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Err(anyhow!("disk on fire"))
    }

    async fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        Err(anyhow!("disk on fire"))
    }
}
