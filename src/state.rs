use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::models::Course;

/// Everything a renderer needs to draw the course screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchState {
    pub is_fetching: bool,
    pub courses: Vec<Course>,
    /// Empty means no error.
    pub error_message: String,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl FetchState {
    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

/// Shared, observable holder of the single `FetchState`.
///
/// Each `update` call is published as one change, so subscribers only ever
/// observe whole mutations.
#[derive(Clone)]
pub struct CourseStore {
    tx: Arc<watch::Sender<FetchState>>,
}

impl CourseStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FetchState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> FetchState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.tx.subscribe()
    }

    pub fn update<F>(&self, mutate: F)
    where
        F: FnOnce(&mut FetchState),
    {
        self.tx.send_modify(mutate);
    }
}

impl Default for CourseStore {
    fn default() -> Self {
        Self::new()
    }
}
