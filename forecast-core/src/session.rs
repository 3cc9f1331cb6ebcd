//! Forecast loading: startup, location selection and refresh.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    model::LocationCandidate,
    provider::{ApiError, WeatherProvider},
    search::SearchController,
    sequence::{RequestSequence, Ticket},
    state::SharedState,
    store::{CITY_KEY, PreferenceStore},
};

/// City shown when nothing has been remembered yet.
pub const DEFAULT_CITY: &str = "Jaipur";

/// Days of daily forecast requested per fetch.
pub const FORECAST_DAYS: u8 = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The snapshot was replaced.
    Applied,
    /// A newer fetch was dispatched first; this answer was dropped.
    Stale,
    /// Fetch failed; the previous snapshot stays on screen.
    Failed(ApiError),
}

/// Owns the current forecast snapshot and the loading flag.
#[derive(Debug)]
pub struct ForecastSession {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<dyn PreferenceStore>,
    search: Arc<SearchController>,
    sequence: RequestSequence,
    default_city: String,
}

impl ForecastSession {
    /// The session shares the search controller's state so that a selection
    /// can close the search box.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        store: Arc<dyn PreferenceStore>,
        search: Arc<SearchController>,
    ) -> Self {
        Self {
            provider,
            store,
            search,
            sequence: RequestSequence::new(),
            default_city: DEFAULT_CITY.to_string(),
        }
    }

    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    pub fn state(&self) -> &SharedState {
        self.search.state()
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    /// Startup load: the remembered city if there is one, otherwise the default.
    pub async fn initialize(&self) -> FetchOutcome {
        // Dispatch before the store read so a selection made meanwhile still wins.
        let ticket = self.begin();
        let city = self.startup_city().await;

        info!(city = %city, "loading initial forecast");
        self.fetch(ticket, &city).await
    }

    /// Show the forecast for a picked candidate and remember it for next time.
    pub async fn select_location(&self, candidate: &LocationCandidate) -> FetchOutcome {
        self.search.close();
        let ticket = self.begin();

        info!(city = %candidate.name, "location selected");
        let outcome = self.fetch(ticket, &candidate.name).await;

        if outcome == FetchOutcome::Applied {
            if let Err(e) = self.store.set(CITY_KEY, &candidate.name).await {
                warn!(city = %candidate.name, error = %e, "failed to remember selected city");
            }
        }

        outcome
    }

    /// Fetch the displayed city again without touching the remembered city.
    /// With nothing on screen this retries the startup city.
    pub async fn refresh(&self) -> FetchOutcome {
        let ticket = self.begin();
        let displayed = self.state().snapshot().current().map(|s| s.location.name.clone());
        let city = match displayed {
            Some(city) => city,
            None => self.startup_city().await,
        };

        debug!(city = %city, "refreshing forecast");
        self.fetch(ticket, &city).await
    }

    async fn startup_city(&self) -> String {
        match self.store.get(CITY_KEY).await {
            Ok(Some(city)) if !city.trim().is_empty() => city,
            Ok(_) => self.default_city.clone(),
            Err(e) => {
                warn!(error = %e, "could not read remembered city, using default");
                self.default_city.clone()
            }
        }
    }

    fn begin(&self) -> Ticket {
        let ticket = self.sequence.issue();
        self.state().update(|s| s.loading = true);
        ticket
    }

    async fn fetch(&self, ticket: Ticket, city: &str) -> FetchOutcome {
        debug!(city, ?ticket, days = FORECAST_DAYS, "dispatching forecast fetch");
        let result = self.provider.fetch_forecast(city, FORECAST_DAYS).await;

        let outcome = self.state().update(|s| {
            if !self.sequence.is_latest(ticket) {
                return FetchOutcome::Stale;
            }

            s.loading = false;
            match result {
                Ok(snapshot) => {
                    s.current = Some(snapshot);
                    s.last_error = None;
                    FetchOutcome::Applied
                }
                Err(e) => {
                    s.last_error = Some(e.to_string());
                    FetchOutcome::Failed(e)
                }
            }
        });

        match &outcome {
            FetchOutcome::Applied => info!(city, "forecast updated"),
            FetchOutcome::Stale => debug!(city, ?ticket, "discarding stale forecast"),
            FetchOutcome::Failed(e) => warn!(city, error = %e, "forecast fetch failed"),
        }

        outcome
    }
}
