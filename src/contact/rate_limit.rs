//! In-memory, single-process rate limiter.
//!
//! A map from client key to a count/reset-time window. This is a
//! deliberate placeholder: counts reset on restart and are not shared
//! across horizontally scaled instances. A multi-instance deployment
//! needs an external shared counter store instead.

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: Instant,
}

/// Per-key request counter over a rolling window.
pub struct RateLimiter {
    windows: Mutex<FxHashMap<String, Window>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(FxHashMap::default()),
        }
    }

    /// Record a request for `key` and report whether it is allowed.
    ///
    /// The first `limit` requests within `window` return `true`; further
    /// requests return `false` until the window resets.
    pub fn check(&self, key: &str, limit: u32, window: Duration) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock();

        let entry = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + window,
        });

        if now >= entry.reset_at {
            entry.count = 0;
            entry.reset_at = now + window;
        }

        entry.count += 1;
        entry.count <= limit
    }

    /// Drop expired windows. Called opportunistically by the server loop
    /// so the map does not grow without bound.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.windows.lock().retain(|_, w| now < w.reset_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(900);

        for _ in 0..5 {
            assert!(limiter.check("1.2.3.4", 5, window));
        }
        assert!(!limiter.check("1.2.3.4", 5, window));
    }

    #[test]
    fn test_window_reset_allows_again() {
        let limiter = RateLimiter::new();
        let window = Duration::from_millis(50);

        for _ in 0..5 {
            assert!(limiter.check("1.2.3.4", 5, window));
        }
        assert!(!limiter.check("1.2.3.4", 5, window));

        sleep(Duration::from_millis(60));
        assert!(limiter.check("1.2.3.4", 5, window));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(900);

        for _ in 0..5 {
            assert!(limiter.check("1.2.3.4", 5, window));
        }
        assert!(!limiter.check("1.2.3.4", 5, window));
        assert!(limiter.check("5.6.7.8", 5, window));
    }

    #[test]
    fn test_purge_expired() {
        let limiter = RateLimiter::new();
        limiter.check("1.2.3.4", 5, Duration::from_millis(10));
        limiter.check("5.6.7.8", 5, Duration::from_secs(900));

        sleep(Duration::from_millis(20));
        limiter.purge_expired();

        assert_eq!(limiter.windows.lock().len(), 1);
    }
}
