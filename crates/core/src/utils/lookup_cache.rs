//! Read-through lookup cache with an injectable clock.
//!
//! The calling layer resolves display names (aircraft types, users, fuel
//! trucks) against a remote store. Those lookups are cached here in an
//! explicit object that is constructed once and passed by reference into
//! whatever service needs it - never a module-level singleton. The clock is
//! a trait so tests can advance time manually.

use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::errors::Result;

/// Source of the current instant. Production code uses [`SystemClock`];
/// tests inject a controllable implementation.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Clock backed by `std::time::Instant::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CachedEntry<V> {
    value: V,
    loaded_at: Instant,
}

/// TTL-bounded read-through cache.
pub struct LookupCache<K, V> {
    entries: DashMap<K, CachedEntry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> LookupCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    /// Returns the cached value for `key`, invoking `loader` on a miss or an
    /// expired entry. Loader failures are propagated and nothing is cached.
    pub fn get_or_load<F>(&self, key: &K, loader: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        let now = self.clock.now();
        if let Some(entry) = self.entries.get(key) {
            if now.duration_since(entry.loaded_at) < self.ttl {
                return Ok(entry.value.clone());
            }
        }

        let value = loader()?;
        self.entries.insert(
            key.clone(),
            CachedEntry {
                value: value.clone(),
                loaded_at: now,
            },
        );
        Ok(value)
    }

    /// Drops a single entry, forcing the next lookup through the loader.
    pub fn invalidate(&self, key: &K) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }

    #[test]
    fn test_second_lookup_hits_cache() {
        let clock = Arc::new(ManualClock::new());
        let cache: LookupCache<String, String> =
            LookupCache::new(Duration::from_secs(60), clock.clone());

        let key = "GLF5".to_string();
        let first = cache
            .get_or_load(&key, || Ok("Gulfstream G550".to_string()))
            .unwrap();
        assert_eq!(first, "Gulfstream G550");

        // Loader returning an error must not run on a warm entry.
        let second = cache
            .get_or_load(&key, || {
                panic!("loader should not be called for a cached key")
            })
            .unwrap();
        assert_eq!(second, "Gulfstream G550");
    }

    #[test]
    fn test_expired_entry_reloads() {
        let clock = Arc::new(ManualClock::new());
        let cache: LookupCache<String, u32> =
            LookupCache::new(Duration::from_secs(60), clock.clone());

        let key = "K100".to_string();
        cache.get_or_load(&key, || Ok(1)).unwrap();
        clock.advance(Duration::from_secs(61));
        let reloaded = cache.get_or_load(&key, || Ok(2)).unwrap();
        assert_eq!(reloaded, 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let clock = Arc::new(ManualClock::new());
        let cache: LookupCache<String, u32> =
            LookupCache::new(Duration::from_secs(60), clock);

        let key = "C172".to_string();
        cache.get_or_load(&key, || Ok(1)).unwrap();
        cache.invalidate(&key);
        let reloaded = cache.get_or_load(&key, || Ok(7)).unwrap();
        assert_eq!(reloaded, 7);
    }

    #[test]
    fn test_loader_error_is_not_cached() {
        let clock = Arc::new(ManualClock::new());
        let cache: LookupCache<String, u32> =
            LookupCache::new(Duration::from_secs(60), clock);

        let key = "PC12".to_string();
        let err = cache.get_or_load(&key, || {
            Err(crate::errors::Error::Repository("down".to_string()))
        });
        assert!(err.is_err());

        let ok = cache.get_or_load(&key, || Ok(3)).unwrap();
        assert_eq!(ok, 3);
    }
}
