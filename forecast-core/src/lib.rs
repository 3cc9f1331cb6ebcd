//! Core library for the `forecast` app.
//!
//! This crate defines:
//! - Configuration and the remembered-city preference store
//! - The WeatherAPI.com provider behind the [`WeatherProvider`] trait
//! - A debounced city search and the forecast session sharing one [`SharedState`]
//! - Pure display mapping (condition artwork, weekday names, view values)
//!
//! It is used by `forecast-cli`, but any front end can drive it.

pub mod condition;
pub mod config;
pub mod dayname;
pub mod debounce;
pub mod model;
pub mod provider;
pub mod search;
pub mod sequence;
pub mod session;
pub mod state;
pub mod store;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use condition::{Asset, map_condition};
pub use config::Config;
pub use dayname::day_name;
pub use model::{ForecastSnapshot, LocationCandidate};
pub use provider::{ApiError, WeatherProvider, provider_from_config};
pub use search::{LookupOutcome, SearchController};
pub use session::{FetchOutcome, ForecastSession};
pub use state::{SessionState, SharedState};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use view::{ForecastView, Screen};
