use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

// Counts per client plus the moment the current window opened
struct RateLimitWindow {
    counts: HashMap<String, u32>,
    window_start: Instant,
}

/// Per-client request limiter with a shared fixed window.
///
/// Every client's count is dropped together on the first check after the
/// window has elapsed.
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    state: Mutex<RateLimitWindow>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self::starting_at(limit, window, Instant::now())
    }

    fn starting_at(limit: u32, window: Duration, window_start: Instant) -> Self {
        Self {
            limit,
            window,
            state: Mutex::new(RateLimitWindow {
                counts: HashMap::new(),
                window_start,
            }),
        }
    }

    /// Returns `true` if the request from `client` is admitted.
    pub fn admit(&self, client: &str) -> bool {
        self.admit_at(client, Instant::now())
    }

    fn admit_at(&self, client: &str, now: Instant) -> bool {
        let mut state = self.lock();

        // window expired..? Reset everyone
        if now.saturating_duration_since(state.window_start) > self.window {
            state.counts.clear();
            state.window_start = now;
        }

        let count = state.counts.entry(client.to_string()).or_insert(0);

        // over limit
        if *count >= self.limit {
            return false;
        }

        *count += 1;
        true
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    fn lock(&self) -> MutexGuard<'_, RateLimitWindow> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn count(&self, client: &str) -> u32 {
        self.lock().counts.get(client).copied().unwrap_or(0)
    }
}
