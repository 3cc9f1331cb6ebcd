use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::{
    model::{ForecastSnapshot, LocationCandidate},
    provider::ApiError,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

#[derive(Debug)]
pub struct WeatherApiProviderBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl WeatherApiProviderBuilder {
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<WeatherApiProvider> {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client for WeatherAPI.com")?;

        Ok(WeatherApiProvider { api_key: self.api_key, base_url: self.base_url, http })
    }
}

impl WeatherApiProvider {
    pub fn builder(api_key: &str) -> WeatherApiProviderBuilder {
        WeatherApiProviderBuilder {
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, ApiError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, what, "sending WeatherAPI request");

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("{what} request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read {what} body: {e}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<WaErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| truncate_body(&body));

            return Err(ApiError::Rejected { status: status.as_u16(), message });
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::Malformed(format!("failed to parse {what} JSON: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct WaErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct WaErrorEnvelope {
    error: WaErrorBody,
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn resolve_locations(&self, query: &str) -> Result<Vec<LocationCandidate>, ApiError> {
        self.get_json("search.json", &[("q", query)], "search").await
    }

    async fn fetch_forecast(&self, city: &str, days: u8) -> Result<ForecastSnapshot, ApiError> {
        let days = days.to_string();
        self.get_json(
            "forecast.json",
            &[("q", city), ("days", days.as_str()), ("aqi", "no"), ("alerts", "no")],
            "forecast",
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_strips_trailing_slash() {
        let provider = WeatherApiProvider::builder("KEY")
            .base_url("http://localhost:8080/v1/")
            .build()
            .expect("client builds");

        assert_eq!(provider.base_url(), "http://localhost:8080/v1");
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("bad gateway"), "bad gateway");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
