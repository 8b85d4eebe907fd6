use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;

/// Fixed-window counter keyed by client address. Guards the login endpoint.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    requests_per_window: u32,
    window_duration: Duration,
}

#[derive(Debug)]
struct Window {
    started: Instant,
    request_count: u32,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        Self::with_window(requests_per_minute, Duration::from_secs(60))
    }

    pub fn with_window(requests_per_window: u32, window_duration: Duration) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            requests_per_window,
            window_duration,
        }
    }

    pub fn get_client_key(&self, addr: Option<&SocketAddr>) -> String {
        addr.map(|a| a.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn check_rate_limit(&self, client_key: &str) -> bool {
        let now = Instant::now();

        let mut entry = self
            .windows
            .entry(client_key.to_string())
            .or_insert(Window {
                started: now,
                request_count: 0,
            });

        if now.duration_since(entry.started) >= self.window_duration {
            entry.started = now;
            entry.request_count = 0;
        }

        if entry.request_count >= self.requests_per_window {
            return false;
        }

        entry.request_count += 1;
        true
    }

    /// Drops windows that have already run out.
    pub fn purge_stale(&self) {
        let now = Instant::now();
        self.windows
            .retain(|_, window| now.duration_since(window.started) < self.window_duration);
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
