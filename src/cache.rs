//! # Single-Slot TTL Cache
//!
//! Holds the most recently fetched value together with the instant it was captured:
//! - **Expiration**: `get` only returns the value while `now - captured_at < ttl`.
//!   An expired slot is evicted on read.
//! - **Overwrite**: `set` replaces the slot unconditionally and resets the timestamp.
//! - **Stats**: hit/miss/expiration/store counters for introspection.
//!
//! The dashboard has exactly one dataset shape, so there is no keying and no LRU.
//! Clones share the same slot; the cache is created once at application start and
//! invalidated on explicit refresh.
//!
//! ## Example
//! ```rust
//! use seo_dashboard::cache::TtlCache;
//! use std::time::Duration;
//!
//! let cache = TtlCache::new(Duration::from_secs(300));
//! cache.set(42);
//! assert_eq!(cache.get().as_deref(), Some(&42));
//! ```

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};
use tracing::debug;

use crate::{
    model::Dataset,
    platform::{DEFAULT_CACHE_TTL, Instant},
};

/// The cache the dashboard keeps its dataset in
pub type DatasetCache = TtlCache<Dataset>;

/// A captured value with its capture instant
struct CacheEntry<T> {
    data: Arc<T>,
    cached_at: Instant,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data: Arc::new(data),
            cached_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() >= ttl
    }
}

#[derive(Default)]
struct Counters {
    hits: AtomicU32,
    misses: AtomicU32,
    expirations: AtomicU32,
    stores: AtomicU32,
}

/// Single-slot cache with a time-to-live
pub struct TtlCache<T> {
    slot: Arc<Mutex<Option<CacheEntry<T>>>>,
    counters: Arc<Counters>,
    ttl: Duration,
}

impl<T> Clone for TtlCache<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            counters: self.counters.clone(),
            ttl: self.ttl,
        }
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

impl<T> std::fmt::Debug for TtlCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("ttl", &self.ttl)
            .field("populated", &self.is_populated())
            .finish()
    }
}

impl<T> TtlCache<T> {
    /// Creates an empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            counters: Arc::new(Counters::default()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value if it is younger than the TTL.
    ///
    /// An expired value is evicted and `None` is returned.
    pub fn get(&self) -> Option<Arc<T>> {
        let Ok(mut slot) = self.slot.lock() else {
            return None;
        };

        match slot.as_ref() {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.data.clone())
            }
            Some(entry) => {
                debug!(
                    "🗑️ [CACHE-EXPIRATION] Evicting dataset captured {:?} ago",
                    entry.cached_at.elapsed()
                );
                *slot = None;
                self.counters.expirations.fetch_add(1, Ordering::Relaxed);
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Stores a value, replacing whatever was there, and returns the shared handle.
    pub fn set(&self, value: T) -> Arc<T> {
        let entry = CacheEntry::new(value);
        let data = entry.data.clone();
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(entry);
            self.counters.stores.fetch_add(1, Ordering::Relaxed);
            debug!("📊 [CACHE-STORE] Stored dataset (ttl {:?})", self.ttl);
        }
        data
    }

    /// Drops the cached value, if any.
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            if slot.take().is_some() {
                debug!("🗑️ [CACHE-INVALIDATE] Invalidated cached dataset");
            }
        }
    }

    /// Whether a value is stored, expired or not
    pub fn is_populated(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Age of the stored value, if any
    pub fn age(&self) -> Option<Duration> {
        self.slot
            .lock()
            .ok()?
            .as_ref()
            .map(|entry| entry.cached_at.elapsed())
    }

    /// Time left before the stored value expires
    pub fn remaining(&self) -> Option<Duration> {
        self.age().map(|age| self.ttl.saturating_sub(age))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            expirations: self.counters.expirations.load(Ordering::Relaxed),
            stores: self.counters.stores.load(Ordering::Relaxed),
            age: self.age(),
        }
    }
}

/// Counters describing how the cache has been used
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
    pub expirations: u32,
    pub stores: u32,
    pub age: Option<Duration>,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups > 0 {
            self.hits as f64 / lookups as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_returns_value() {
        let cache = TtlCache::new(Duration::from_secs(300));
        assert!(cache.get().is_none());

        cache.set("first".to_string());
        assert_eq!(cache.get().as_deref().map(String::as_str), Some("first"));
        assert!(cache.is_populated());
    }

    #[test]
    fn test_set_overwrites() {
        let cache = TtlCache::new(Duration::from_secs(300));
        cache.set(1);
        cache.set(2);
        assert_eq!(cache.get().as_deref(), Some(&2));
        assert_eq!(cache.stats().stores, 2);
    }

    #[test]
    fn test_expired_value_is_evicted() {
        let cache = TtlCache::new(Duration::from_millis(20));
        cache.set(7);
        std::thread::sleep(Duration::from_millis(40));

        assert!(cache.get().is_none());
        assert!(!cache.is_populated());
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_zero_ttl_never_serves() {
        let cache = TtlCache::new(Duration::ZERO);
        cache.set(7);
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_clones_share_the_slot() {
        let cache = DatasetCache::default();
        let other = cache.clone();
        other.set(Dataset::default());
        assert!(cache.get().is_some());

        cache.invalidate();
        assert!(other.get().is_none());
    }

    #[test]
    fn test_stats_hit_ratio() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let _ = cache.get();
        cache.set(1);
        let _ = cache.get();
        let _ = cache.get();

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_ratio() - 2.0 / 3.0).abs() < 1e-9);
        assert!(stats.age.is_some());
        assert!(cache.remaining().is_some_and(|left| left <= Duration::from_secs(60)));
    }
}
