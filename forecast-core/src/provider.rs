use crate::{
    Config,
    model::{ForecastSnapshot, LocationCandidate},
    provider::weatherapi::WeatherApiProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};
use thiserror::Error;

pub mod weatherapi;

/// Failure kinds surfaced by a [`WeatherProvider`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Network unreachable, connection refused or timed out.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The API answered with a non-success status.
    #[error("Request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve free text into location suggestions. An empty list is a valid answer.
    async fn resolve_locations(&self, query: &str) -> Result<Vec<LocationCandidate>, ApiError>;

    /// Fetch a `days`-long forecast for a named city.
    async fn fetch_forecast(&self, city: &str, days: u8) -> Result<ForecastSnapshot, ApiError>;
}

/// Construct the WeatherAPI.com provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<WeatherApiProvider> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for WeatherAPI.com.\n\
                 Hint: run `forecast configure` and enter your API key."
        )
    })?;

    WeatherApiProvider::builder(api_key)
        .base_url(&config.base_url)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
}
