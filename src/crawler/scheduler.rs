//! Fetch rate limiting
//!
//! This module handles:
//! - Global concurrency limiting via a semaphore
//! - A minimum spacing between the start of consecutive fetches
//!
//! Listing-page fetches and article fetches draw from the same limiter, so
//! they interleave safely.

use crate::config::CrawlerConfig;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;

/// Permission to perform one fetch; the slot is released on drop
pub struct FetchPermit {
    _permit: OwnedSemaphorePermit,
}

/// Shared limiter for all outbound fetches of one crawler
///
/// With one permit this reproduces a strictly sequential crawler that waits
/// a fixed delay between fetches.
pub struct RateLimiter {
    /// Caps fetches in flight
    permits: Arc<Semaphore>,

    /// Minimum time between two fetch starts
    min_interval: Duration,

    /// Earliest instant the next fetch may start
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Creates a limiter
    ///
    /// # Arguments
    ///
    /// * `max_in_flight` - Maximum concurrent fetches (at least 1 is used)
    /// * `min_interval` - Minimum spacing between fetch starts
    pub fn new(max_in_flight: usize, min_interval: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_in_flight.max(1))),
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    /// Creates a limiter from the crawler settings
    pub fn from_config(config: &CrawlerConfig) -> Self {
        let interval = Duration::try_from_secs_f64(config.rate_limit_delay).unwrap_or_default();
        Self::new(config.max_concurrent_fetches as usize, interval)
    }

    /// Returns the configured spacing between fetch starts
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Returns the number of fetch slots currently free
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Waits until a fetch may start
    ///
    /// Acquires an in-flight slot, then reserves the next start time and
    /// sleeps until it arrives. Returns None only if the limiter was closed.
    pub async fn acquire(&self) -> Option<FetchPermit> {
        let permit = self.permits.clone().acquire_owned().await.ok()?;

        let wait = {
            let mut next_slot = self
                .next_slot
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let now = Instant::now();
            let start = match *next_slot {
                Some(slot) if slot > now => slot,
                _ => now,
            };
            *next_slot = Some(start + self.min_interval);
            start - now
        };

        if !wait.is_zero() {
            tracing::trace!("Rate limiter waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }

        Some(FetchPermit { _permit: permit })
    }

    /// Stops handing out permits; pending and future acquires return None
    pub fn close(&self) {
        self.permits.close();
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> CrawlerConfig {
        CrawlerConfig {
            rate_limit_delay: 0.25,
            max_concurrent_fetches: 3,
            ..CrawlerConfig::default()
        }
    }

    #[test]
    fn test_from_config() {
        let limiter = RateLimiter::from_config(&create_test_config());
        assert_eq!(limiter.min_interval(), Duration::from_millis(250));
        assert_eq!(limiter.available_permits(), 3);
    }

    #[test]
    fn test_zero_concurrency_still_allows_one() {
        let limiter = RateLimiter::new(0, Duration::ZERO);
        assert_eq!(limiter.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_first_fetch_is_immediate() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let started = Instant::now();
        let permit = limiter.acquire().await;
        assert!(permit.is_some());
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_fetch_starts_are_spaced() {
        let limiter = RateLimiter::new(4, Duration::from_millis(40));
        let started = Instant::now();

        for _ in 0..3 {
            let _permit = limiter.acquire().await;
        }

        // Three starts need at least two full intervals between them
        assert!(started.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn test_permits_cap_in_flight() {
        let limiter = RateLimiter::new(2, Duration::ZERO);

        let first = limiter.acquire().await;
        let second = limiter.acquire().await;
        assert_eq!(limiter.available_permits(), 0);

        drop(first);
        assert_eq!(limiter.available_permits(), 1);
        drop(second);
        assert_eq!(limiter.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_closed_limiter_refuses() {
        let limiter = RateLimiter::new(1, Duration::ZERO);
        assert!(!limiter.is_closed());
        limiter.close();
        assert!(limiter.is_closed());
        assert!(limiter.acquire().await.is_none());
    }
}
