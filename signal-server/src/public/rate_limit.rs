//! Fixed-window rate limiting for guest request creation

use std::sync::Arc;

use dashmap::DashMap;

use crate::utils::Clock;

/// Bucket key: one window per client, tenant and table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateKey {
    pub client_ip: String,
    pub company_slug: String,
    pub table_number: i32,
}

impl RateKey {
    pub fn new(client_ip: impl Into<String>, company_slug: impl Into<String>, table_number: i32) -> Self {
        Self {
            client_ip: client_ip.into(),
            company_slug: company_slug.into(),
            table_number,
        }
    }
}

/// Atomic check-and-increment against a per-key budget
pub trait RateLimit: Send + Sync {
    /// Returns `true` when the call is allowed (and counted)
    fn check_and_increment(&self, key: &RateKey) -> bool;
}

struct WindowEntry {
    count: u32,
    reset_at: i64,
}

/// In-process fixed-window limiter.
///
/// A window opens on the first call for a key and is replaced lazily by the
/// first call after it expires.
pub struct FixedWindowLimiter {
    entries: DashMap<RateKey, WindowEntry>,
    clock: Arc<dyn Clock>,
    max_requests: u32,
    window_millis: i64,
}

impl FixedWindowLimiter {
    pub fn new(clock: Arc<dyn Clock>, max_requests: u32, window_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            max_requests,
            window_millis: i64::try_from(window_secs.saturating_mul(1000)).unwrap_or(i64::MAX),
        }
    }

    /// Drop buckets whose window has expired; returns how many were removed
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now_millis();
        let before = self.entries.len();
        self.entries.retain(|_, entry| now <= entry.reset_at);
        before - self.entries.len()
    }
}

impl RateLimit for FixedWindowLimiter {
    fn check_and_increment(&self, key: &RateKey) -> bool {
        let now = self.clock.now_millis();
        // The entry guard holds the shard lock, so check and increment are atomic per key
        let mut entry = self.entries.entry(key.clone()).or_insert_with(|| WindowEntry {
            count: 0,
            reset_at: now + self.window_millis,
        });

        if now > entry.reset_at {
            entry.count = 1;
            entry.reset_at = now + self.window_millis;
            return true;
        }
        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ManualClock;

    fn limiter(clock: &Arc<ManualClock>) -> FixedWindowLimiter {
        FixedWindowLimiter::new(clock.clone(), 5, 60)
    }

    #[test]
    fn five_per_window_then_rejected() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(&clock);
        let key = RateKey::new("10.0.0.1", "restaurant", 4);

        for _ in 0..5 {
            assert!(limiter.check_and_increment(&key));
        }
        assert!(!limiter.check_and_increment(&key));

        clock.advance_secs(30);
        assert!(!limiter.check_and_increment(&key));
    }

    #[test]
    fn window_resets_after_expiry() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(&clock);
        let key = RateKey::new("10.0.0.1", "restaurant", 4);
        for _ in 0..6 {
            limiter.check_and_increment(&key);
        }

        clock.advance_secs(61);
        assert!(limiter.check_and_increment(&key));
        for _ in 0..4 {
            assert!(limiter.check_and_increment(&key));
        }
        assert!(!limiter.check_and_increment(&key));
    }

    #[test]
    fn keys_are_independent() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(&clock);
        let a = RateKey::new("10.0.0.1", "restaurant", 4);
        for _ in 0..5 {
            limiter.check_and_increment(&a);
        }
        assert!(!limiter.check_and_increment(&a));
        assert!(limiter.check_and_increment(&RateKey::new("10.0.0.1", "restaurant", 5)));
        assert!(limiter.check_and_increment(&RateKey::new("10.0.0.2", "restaurant", 4)));
        assert!(limiter.check_and_increment(&RateKey::new("10.0.0.1", "bistro", 4)));
    }

    #[test]
    fn cleanup_drops_expired_windows() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = limiter(&clock);
        limiter.check_and_increment(&RateKey::new("a", "restaurant", 1));
        clock.advance_secs(30);
        limiter.check_and_increment(&RateKey::new("b", "restaurant", 1));

        clock.advance_secs(35);
        assert_eq!(limiter.cleanup(), 1);
        assert_eq!(limiter.cleanup(), 0);

        // b's window is still open
        clock.advance_secs(30);
        assert_eq!(limiter.cleanup(), 1);
    }

    #[test]
    fn concurrent_callers_never_exceed_budget() {
        let clock = Arc::new(ManualClock::new(0));
        let limiter = Arc::new(limiter(&clock));
        let key = RateKey::new("10.0.0.9", "restaurant", 2);

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let limiter = limiter.clone();
                let key = key.clone();
                std::thread::spawn(move || limiter.check_and_increment(&key))
            })
            .collect();
        let allowed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(allowed, 5);
    }
}
