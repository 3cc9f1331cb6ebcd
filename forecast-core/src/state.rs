//! State shared by the search controller and the forecast session.
//!
//! Renderers only ever see clones; writes go through the controller and
//! session operations.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::model::{ForecastSnapshot, LocationCandidate};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub(crate) search_open: bool,
    pub(crate) query: String,
    pub(crate) candidates: Vec<LocationCandidate>,
    pub(crate) current: Option<ForecastSnapshot>,
    pub(crate) loading: bool,
    pub(crate) last_error: Option<String>,
}

impl SessionState {
    pub fn search_open(&self) -> bool {
        self.search_open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        &self.candidates
    }

    pub fn current(&self) -> Option<&ForecastSnapshot> {
        self.current.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed forecast fetch, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(crate) fn close_search(&mut self) {
        self.search_open = false;
        self.query.clear();
        self.candidates.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct SharedState(Arc<Mutex<SessionState>>);

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the state as it is right now.
    pub fn snapshot(&self) -> SessionState {
        self.0.lock().clone()
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.0.lock())
    }
}
