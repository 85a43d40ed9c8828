//! Cache Statistics Module
//!
//! Process-wide counters for cache hits, misses and HTTP requests, plus uptime.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

// == Stats Aggregator ==
/// Shared counters, safe to update from concurrent handlers.
///
/// A snapshot reads each counter independently, so it is approximate while
/// requests are in flight.
#[derive(Debug)]
pub struct StatsAggregator {
    hits: AtomicU64,
    misses: AtomicU64,
    total_requests: AtomicU64,
    started: Instant,
    started_at: DateTime<Utc>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub total_requests: u64,
    pub uptime_secs: u64,
    pub started_at: DateTime<Utc>,
}

impl StatsAggregator {
    // == Constructor ==
    /// Creates an aggregator with all counters at zero, starting the uptime clock.
    pub fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            total_requests: AtomicU64::new(0),
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    // == Snapshot ==
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            total_requests: self.total_requests.load(Ordering::Relaxed),
            uptime_secs: self.started.elapsed().as_secs(),
            started_at: self.started_at,
        }
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsSnapshot {
    /// Hit rate as a percentage of total requests.
    pub fn hit_rate(&self) -> f64 {
        hit_rate_percent(self.hits, self.total_requests)
    }
}

// == Hit Rate ==
/// `hits / total * 100`, rounded to two decimals. Zero when `total` is zero.
pub fn hit_rate_percent(hits: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = hits as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

// == Uptime Formatting ==
/// Formats whole seconds as `"<h>h <m>m <s>s"`.
pub fn format_uptime(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{}h {}m {}s", hours, minutes, secs)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StatsAggregator::new();
        let snap = stats.snapshot();
        assert_eq!(snap.hits, 0);
        assert_eq!(snap.misses, 0);
        assert_eq!(snap.total_requests, 0);
        assert_eq!(snap.uptime_secs, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = StatsAggregator::new();
        assert_eq!(stats.snapshot().hit_rate(), 0.0);
        assert_eq!(hit_rate_percent(5, 0), 0.0);
    }

    #[test]
    fn test_hit_rate_rounding() {
        assert_eq!(hit_rate_percent(1, 3), 33.33);
        assert_eq!(hit_rate_percent(2, 3), 66.67);
        assert_eq!(hit_rate_percent(1, 2), 50.0);
        assert_eq!(hit_rate_percent(4, 4), 100.0);
    }

    #[test]
    fn test_counters() {
        let stats = StatsAggregator::new();
        stats.record_request();
        stats.record_request();
        stats.record_request();
        stats.record_miss();
        stats.record_hit();
        stats.record_hit();

        let snap = stats.snapshot();
        assert_eq!(snap.hits, 2);
        assert_eq!(snap.misses, 1);
        assert_eq!(snap.total_requests, 3);
        assert_eq!(snap.hit_rate(), 66.67);
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0h 0m 0s");
        assert_eq!(format_uptime(59), "0h 0m 59s");
        assert_eq!(format_uptime(61), "0h 1m 1s");
        assert_eq!(format_uptime(3_725), "1h 2m 5s");
        assert_eq!(format_uptime(90_000), "25h 0m 0s");
    }

    #[tokio::test]
    async fn test_concurrent_updates() {
        let stats = std::sync::Arc::new(StatsAggregator::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = stats.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..100 {
                    stats.record_request();
                    stats.record_hit();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let snap = stats.snapshot();
        assert_eq!(snap.total_requests, 800);
        assert_eq!(snap.hits, 800);
    }
}
