//! In-flight request tracking for network-idle detection.
//!
//! The page's listener tasks report `Network.requestWillBeSent`,
//! `Network.loadingFinished` and `Network.loadingFailed` here. The page is
//! idle once no request has been in flight for a quiet period.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Activity {
    in_flight: HashSet<String>,
    last_change: Instant,
}

/// Shared, cloneable view of a page's outstanding requests.
#[derive(Debug, Clone)]
pub struct NetworkTracker {
    activity: Arc<Mutex<Activity>>,
}

impl NetworkTracker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            activity: Arc::new(Mutex::new(Activity {
                in_flight: HashSet::new(),
                last_change: Instant::now(),
            })),
        }
    }

    fn with_activity<T>(&self, f: impl FnOnce(&mut Activity) -> T) -> T {
        let mut activity = self.activity.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut activity)
    }

    /// Redirects reuse their request id, so a repeat start is not a new request.
    pub fn request_started(&self, request_id: &str) {
        self.with_activity(|a| {
            a.in_flight.insert(request_id.to_string());
            a.last_change = Instant::now();
        });
    }

    /// Covers both `loadingFinished` and `loadingFailed`. Unknown ids are
    /// ignored: they belong to requests issued before tracking began.
    pub fn request_settled(&self, request_id: &str) {
        self.with_activity(|a| {
            if a.in_flight.remove(request_id) {
                a.last_change = Instant::now();
            }
        });
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.with_activity(|a| a.in_flight.len())
    }

    /// How long the page has had nothing in flight; zero while busy.
    #[must_use]
    pub fn quiet_for(&self) -> Duration {
        self.with_activity(|a| {
            if a.in_flight.is_empty() {
                a.last_change.elapsed()
            } else {
                Duration::ZERO
            }
        })
    }

    #[must_use]
    pub fn is_idle(&self, quiet_period: Duration) -> bool {
        self.quiet_for() >= quiet_period
    }

    /// Forgets outstanding requests, e.g. before a new navigation.
    pub fn reset(&self) {
        self.with_activity(|a| {
            a.in_flight.clear();
            a.last_change = Instant::now();
        });
    }
}

impl Default for NetworkTracker {
    fn default() -> Self {
        Self::new()
    }
}
