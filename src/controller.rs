use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span, warn};

use crate::error::FetchError;
use crate::models::decode_courses;
use crate::source::CourseSource;
use crate::state::{CourseStore, FetchState};

/// Drives remote fetches of the course list and publishes the outcome
/// through a `CourseStore`.
///
/// There is no de-duplication: overlapping fetches each run to completion
/// and whichever finishes last wins.
pub struct FetchController {
    source: Arc<dyn CourseSource>,
    store: CourseStore,
    seq: AtomicU64,
}

impl FetchController {
    pub fn new(source: Arc<dyn CourseSource>) -> Self {
        Self::with_store(source, CourseStore::new())
    }

    pub fn with_store(source: Arc<dyn CourseSource>, store: CourseStore) -> Self {
        Self {
            source,
            store,
            seq: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn state(&self) -> FetchState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.store.subscribe()
    }

    pub async fn fetch_courses(&self) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let endpoint = self.source.endpoint().to_string();
        self.run_fetch(&endpoint)
            .instrument(info_span!("fetch", seq, endpoint = %endpoint))
            .await;
    }

    async fn run_fetch(&self, endpoint: &str) {
        self.store.update(|s| s.is_fetching = true);

        // A transport fault leaves `is_fetching` set.
        let response = match self.source.get().await {
            Ok(response) => response,
            Err(e) => {
                self.publish_fault(&e);
                return;
            }
        };

        let status_error = (response.status >= 300).then(|| FetchError::HttpStatus {
            status: response.status,
            url: endpoint.to_string(),
        });
        if let Some(e) = &status_error {
            warn!("{}", e);
        }

        let decoded = decode_courses(&response.body);
        if let Err(e) = &decoded {
            error!("Failed to decode courses: {}", e);
        }

        let fetched = decoded.as_ref().ok().map(Vec::len);
        self.store.update(|s| {
            if let Some(e) = &status_error {
                s.error_message = e.display_message();
            }
            s.is_fetching = false;
            match decoded {
                Ok(courses) => {
                    s.courses = courses;
                    s.last_fetched_at = Some(Utc::now());
                    if status_error.is_none() {
                        s.error_message.clear();
                    }
                }
                Err(e) => s.error_message = e.display_message(),
            }
        });
        if let Some(count) = fetched {
            info!("Fetched {} courses", count);
        }
    }

    fn publish_fault(&self, e: &FetchError) {
        let message = e.display_message();
        error!("{}", message);
        self.store.update(|s| s.error_message = message);
    }

    /// Clears the list right away, then starts a fetch without waiting for it.
    pub fn refresh(self: &Arc<Self>) -> JoinHandle<()> {
        self.store.update(|s| s.courses.clear());
        self.spawn_fetch()
    }

    /// Initial fetch when the screen first appears.
    pub fn mount(self: &Arc<Self>) -> JoinHandle<()> {
        self.spawn_fetch()
    }

    fn spawn_fetch(self: &Arc<Self>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            controller.fetch_courses().await;
        })
    }
}
