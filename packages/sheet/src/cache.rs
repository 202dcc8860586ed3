//! Caller-owned time-boxed cache.
//!
//! The transformation core is pure; the fetch layer that wraps it owns one
//! of these, constructed once at application start, so the sheet export is
//! not re-downloaded on every render. Nothing in this crate holds a hidden
//! cache singleton.

use std::time::{Duration, Instant};

/// A single-value cache with a fixed time-to-live.
#[derive(Debug)]
pub struct TimedCache<T> {
    ttl: Duration,
    slot: Option<Entry<T>>,
}

#[derive(Debug)]
struct Entry<T> {
    value: T,
    expires_at: Instant,
}

impl<T> TimedCache<T> {
    /// Creates an empty cache whose entries live for `ttl`.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    /// Returns the cached value while it is still fresh.
    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.slot
            .as_ref()
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| &entry.value)
    }

    /// Stores a value, restarting the expiry clock.
    pub fn put(&mut self, value: T) {
        self.slot = Some(Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Returns the cached value, refreshing it via `refresh` when the slot
    /// is empty or stale.
    pub fn get_or_refresh_with(&mut self, refresh: impl FnOnce() -> T) -> &T {
        let stale = self
            .slot
            .as_ref()
            .is_none_or(|entry| entry.expires_at <= Instant::now());
        if stale {
            self.put(refresh());
        }

        &self.slot.as_ref().expect("slot filled above").value
    }

    /// Drops the cached value immediately.
    pub fn invalidate(&mut self) {
        self.slot = None;
    }
}
