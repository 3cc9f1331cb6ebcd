//! Subcommands of the `forecast` binary.
//!
//! Prompts here are line based: a query arrives whole once Enter is pressed,
//! so there is no keystroke stream to debounce. Every search goes straight to
//! `SearchController::lookup`; `on_query_change` is for front ends that see
//! individual keystrokes.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, FetchOutcome, FilePreferenceStore, ForecastSession, LocationCandidate, LookupOutcome,
    SearchController, SharedState, WeatherProvider, provider_from_config, view::candidate_label,
};
use inquire::{Select, Text};
use std::sync::Arc;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "7-day weather forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key and the default city.
    Configure,

    /// Show the forecast for the remembered city.
    Show {
        /// Look this city up instead, and remember it.
        #[arg(long)]
        city: Option<String>,
    },

    /// List cities matching a query.
    Search {
        /// At least three characters of a city name.
        query: String,
    },

    /// Search, pick a city and show its forecast until an empty query is entered.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let session = open_session()?;
                let outcome = match city {
                    Some(city) => {
                        let candidate = first_match(&session, &city).await?;
                        session.select_location(&candidate).await
                    }
                    None => session.initialize().await,
                };
                render::print_screen(&session.state().snapshot());

                match outcome {
                    FetchOutcome::Failed(e) => Err(e).context("Failed to load forecast"),
                    _ => Ok(()),
                }
            }
            Command::Search { query } => {
                let session = open_session()?;
                let search = session.search();
                search.open();
                match search.lookup(&query).await {
                    LookupOutcome::TooShort => bail!("Type at least 3 characters to search."),
                    LookupOutcome::Failed => bail!("City search failed, see the log for details."),
                    _ => render::print_candidates(session.state().snapshot().candidates()),
                }
                Ok(())
            }
            Command::Interactive => interactive(open_session()?).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Text::new("WeatherAPI.com API key:")
        .with_initial_value(cfg.api_key().unwrap_or_default())
        .prompt()
        .context("Failed to read API key")?;
    cfg.set_api_key(api_key);

    let default_city = Text::new("City to show when none is remembered:")
        .with_default(&cfg.default_city)
        .prompt()
        .context("Failed to read default city")?;
    cfg.default_city = default_city.trim().to_string();

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn open_session() -> anyhow::Result<ForecastSession> {
    let cfg = Config::load()?;
    let provider: Arc<dyn WeatherProvider> = Arc::new(provider_from_config(&cfg)?);
    let store = Arc::new(FilePreferenceStore::new(Config::preferences_file_path()?));
    let search = Arc::new(SearchController::new(Arc::clone(&provider), SharedState::new()));

    Ok(ForecastSession::new(provider, store, search).with_default_city(cfg.default_city))
}

async fn first_match(session: &ForecastSession, city: &str) -> anyhow::Result<LocationCandidate> {
    let search = session.search();
    search.open();
    match search.lookup(city).await {
        LookupOutcome::TooShort => bail!("Type at least 3 characters of the city name."),
        LookupOutcome::Failed => bail!("City search failed, see the log for details."),
        _ => {}
    }

    session
        .state()
        .snapshot()
        .candidates()
        .first()
        .cloned()
        .with_context(|| format!("No city matches '{city}'"))
}

async fn interactive(session: ForecastSession) -> anyhow::Result<()> {
    session.initialize().await;
    render::print_screen(&session.state().snapshot());

    loop {
        let Some(query) = Text::new("Search City:").prompt_skippable()? else {
            break;
        };
        if query.trim().is_empty() {
            break;
        }

        let search = session.search();
        search.open();
        if search.lookup(&query).await == LookupOutcome::TooShort {
            println!("Type at least 3 characters.");
            continue;
        }

        let candidates = session.state().snapshot().candidates().to_vec();
        if candidates.is_empty() {
            println!("No matching cities.");
            search.close();
            continue;
        }

        let labels: Vec<String> = candidates.iter().map(candidate_label).collect();
        let Some(picked) = Select::new("Pick a city:", labels.clone()).prompt_skippable()? else {
            search.close();
            continue;
        };

        if let Some(candidate) = labels.iter().position(|l| *l == picked).map(|i| &candidates[i]) {
            session.select_location(candidate).await;
            render::print_screen(&session.state().snapshot());
        }
    }

    Ok(())
}
