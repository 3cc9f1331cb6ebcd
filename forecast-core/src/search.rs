//! Debounced city search feeding the candidate list.

use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

use crate::{
    debounce::Debouncer, provider::WeatherProvider, sequence::RequestSequence, state::SharedState,
};

/// Quiet period a query must survive before it is looked up.
pub const SEARCH_QUIET_PERIOD: Duration = Duration::from_millis(1500);

/// Queries shorter than this are never sent to the provider.
pub const MIN_QUERY_CHARS: usize = 3;

/// What happened to a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Query too short; candidates untouched.
    TooShort,
    /// Candidates replaced with this many entries.
    Applied(usize),
    /// A newer lookup was dispatched (or the search was closed) before this one answered.
    Stale,
    /// The search box was closed, so the answer has nowhere to go.
    SearchClosed,
    /// Provider failed; previous candidates kept.
    Failed,
}

#[derive(Debug)]
struct Lookup {
    provider: Arc<dyn WeatherProvider>,
    state: SharedState,
    sequence: RequestSequence,
}

impl Lookup {
    async fn run(&self, query: &str) -> LookupOutcome {
        if query.chars().count() < MIN_QUERY_CHARS {
            debug!(query, "query too short, skipping lookup");
            return LookupOutcome::TooShort;
        }

        let ticket = self.sequence.issue();
        debug!(query, ?ticket, "dispatching location lookup");

        let result = self.provider.resolve_locations(query).await;

        if !self.sequence.is_latest(ticket) {
            debug!(query, ?ticket, "discarding stale location lookup");
            return LookupOutcome::Stale;
        }

        match result {
            Ok(candidates) => self.state.update(|s| {
                if !s.search_open {
                    return LookupOutcome::SearchClosed;
                }
                let n = candidates.len();
                s.candidates = candidates;
                info!(query, candidates = n, "location candidates updated");
                LookupOutcome::Applied(n)
            }),
            Err(e) => {
                warn!(query, error = %e, "location lookup failed, keeping previous candidates");
                LookupOutcome::Failed
            }
        }
    }
}

/// Owns the search box: its open flag, the typed query and the candidate list.
#[derive(Debug)]
pub struct SearchController {
    lookup: Arc<Lookup>,
    debouncer: Debouncer,
}

impl SearchController {
    pub fn new(provider: Arc<dyn WeatherProvider>, state: SharedState) -> Self {
        Self::with_quiet_period(provider, state, SEARCH_QUIET_PERIOD)
    }

    pub fn with_quiet_period(
        provider: Arc<dyn WeatherProvider>,
        state: SharedState,
        quiet_period: Duration,
    ) -> Self {
        Self {
            lookup: Arc::new(Lookup { provider, state, sequence: RequestSequence::new() }),
            debouncer: Debouncer::new(quiet_period),
        }
    }

    pub fn state(&self) -> &SharedState {
        &self.lookup.state
    }

    /// Keystroke handler. Restarts the quiet period; the lookup runs once typing pauses.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_query_change(&self, text: &str) {
        self.lookup.state.update(|s| s.query = text.to_string());

        let lookup = Arc::clone(&self.lookup);
        let text = text.to_string();
        self.debouncer.schedule(async move {
            lookup.run(&text).await;
        });
    }

    /// Look `query` up right away, bypassing the debounce timer.
    pub async fn lookup(&self, query: &str) -> LookupOutcome {
        self.lookup.run(query).await
    }

    pub fn has_pending_lookup(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn open(&self) {
        self.lookup.state.update(|s| s.search_open = true);
    }

    /// Close the search box, dropping candidates and any lookup still pending or in flight.
    pub fn close(&self) {
        self.debouncer.cancel();
        self.lookup.sequence.invalidate();
        self.lookup.state.update(|s| s.close_search());
    }

    /// Returns whether the search box is open afterwards.
    pub fn toggle(&self) -> bool {
        if self.lookup.state.snapshot().search_open() {
            self.close();
            false
        } else {
            self.open();
            true
        }
    }
}
