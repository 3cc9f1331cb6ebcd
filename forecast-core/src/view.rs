//! Display values derived from [`SessionState`]. Nothing here mutates state.

use crate::{
    condition::{Asset, map_condition},
    dayname::day_name,
    model::{ForecastSnapshot, LocationCandidate},
    state::SessionState,
};

const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    /// Nothing has loaded yet (or the first load failed).
    Empty { error: Option<String> },
    Forecast(ForecastView),
}

impl Screen {
    pub fn from_state(state: &SessionState) -> Self {
        if state.loading() {
            return Screen::Loading;
        }
        match state.current() {
            Some(snapshot) => Screen::Forecast(ForecastView::from_snapshot(snapshot)),
            None => Screen::Empty { error: state.last_error().map(str::to_string) },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub city: String,
    pub country: String,
    pub temperature: String,
    pub condition: String,
    pub asset: Asset,
    pub wind: String,
    pub humidity: String,
    pub sunrise: String,
    pub days: Vec<DayCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCard {
    pub day_name: String,
    pub asset: Asset,
    pub avg_temp: String,
}

impl ForecastView {
    pub fn from_snapshot(snapshot: &ForecastSnapshot) -> Self {
        let current = &snapshot.current;
        Self {
            city: snapshot.location.name.clone(),
            country: snapshot.location.country.clone(),
            temperature: degrees(current.temp_c),
            condition: current.condition.text.clone().unwrap_or_default(),
            asset: map_condition(Some(&current.condition)),
            wind: format!("{} km/h", current.wind_kph),
            humidity: format!("{}%", current.humidity),
            sunrise: snapshot.sunrise().unwrap_or(MISSING).to_string(),
            days: snapshot
                .forecast
                .forecastday
                .iter()
                .map(|d| DayCard {
                    day_name: day_name(Some(&d.date)),
                    asset: map_condition(Some(&d.day.condition)),
                    avg_temp: degrees(d.day.avgtemp_c),
                })
                .collect(),
        }
    }

    pub fn headline(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// "Jaipur, India" label for a search suggestion.
pub fn candidate_label(candidate: &LocationCandidate) -> String {
    match candidate.region.as_deref().filter(|r| !r.is_empty() && *r != candidate.name) {
        Some(region) => format!("{}, {region}, {}", candidate.name, candidate.country),
        None => format!("{}, {}", candidate.name, candidate.country),
    }
}

fn degrees(value: f64) -> String {
    format!("{value}°")
}
