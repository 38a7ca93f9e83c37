//! Memo cache for adapter responses
//!
//! LRU-bounded, TTL-checked on access. Keys are (operation, arguments) so two
//! operations called with equal arguments never share an entry.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache key: operation identity plus its request parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey {
    op: &'static str,
    args: Vec<String>,
}

impl MemoKey {
    pub fn new<I, S>(op: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            op,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct MemoEntry<V> {
    value: V,
    inserted_at: Instant,
}

pub struct MemoCache<V> {
    entries: Mutex<LruCache<MemoKey, MemoEntry<V>>>,
    ttl: Duration,
}

impl<V: Clone> MemoCache<V> {
    /// * `capacity` - Maximum number of entries (at least 1)
    /// * `ttl` - Validity window; a zero TTL disables caching
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);

        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<MemoKey, MemoEntry<V>>> {
        // A panic while holding the lock cannot leave an entry half-written
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached value if present and younger than the TTL
    pub fn get(&self, key: &MemoKey) -> Option<V> {
        let mut entries = self.lock();
        let now = Instant::now();

        if let Some(entry) = entries.get(key) {
            if now.duration_since(entry.inserted_at) < self.ttl {
                return Some(entry.value.clone());
            }
            debug!("Memo entry expired for {:?}", key);
            entries.pop(key);
        }

        None
    }

    pub fn insert(&self, key: MemoKey, value: V) {
        if self.ttl.is_zero() {
            return;
        }

        self.lock().put(
            key,
            MemoEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Return the cached value or run `fetch`, caching only `Ok` results
    pub fn get_or_try_fetch<E>(
        &self,
        key: MemoKey,
        fetch: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            debug!("Memo hit for {:?}", key);
            return Ok(value);
        }

        let value = fetch()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn key(arg: &str) -> MemoKey {
        MemoKey::new("search", [arg, "en"])
    }

    #[test]
    fn test_memo_hit_within_ttl() {
        let cache = MemoCache::new(16, Duration::from_secs(60));
        cache.insert(key("hubble"), Some("Hubble Space Telescope".to_string()));

        assert_eq!(
            cache.get(&key("hubble")),
            Some(Some("Hubble Space Telescope".to_string()))
        );
        assert_eq!(cache.get(&key("noaa")), None);
    }

    #[test]
    fn test_memo_expiration() {
        let cache = MemoCache::new(16, Duration::from_millis(50));
        cache.insert(key("hubble"), 1u32);

        std::thread::sleep(Duration::from_millis(80));

        assert_eq!(cache.get(&key("hubble")), None, "Entry should have expired");
        assert!(cache.is_empty(), "Expired entry should be removed on access");
    }

    #[test]
    fn test_memo_lru_eviction() {
        let cache = MemoCache::new(2, Duration::from_secs(60));
        cache.insert(key("a"), 1u32);
        cache.insert(key("b"), 2u32);
        cache.insert(key("c"), 3u32); // evicts "a"

        assert_eq!(cache.get(&key("a")), None);
        assert_eq!(cache.get(&key("b")), Some(2));
        assert_eq!(cache.get(&key("c")), Some(3));
    }

    #[test]
    fn test_memo_operations_do_not_collide() {
        let cache = MemoCache::new(16, Duration::from_secs(60));
        cache.insert(MemoKey::new("search", ["Hubble", "en"]), "search".to_string());
        cache.insert(MemoKey::new("pageprops", ["Hubble", "en"]), "pageprops".to_string());

        assert_eq!(
            cache.get(&MemoKey::new("search", ["Hubble", "en"])),
            Some("search".to_string())
        );
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_get_or_try_fetch_caches_ok_only() {
        let cache: MemoCache<u32> = MemoCache::new(16, Duration::from_secs(60));
        let calls = Cell::new(0);

        let failed: Result<u32, &str> = cache.get_or_try_fetch(key("x"), || {
            calls.set(calls.get() + 1);
            Err("timeout")
        });
        assert!(failed.is_err());
        assert!(cache.is_empty());

        for _ in 0..3 {
            let value: Result<u32, &str> = cache.get_or_try_fetch(key("x"), || {
                calls.set(calls.get() + 1);
                Ok(7)
            });
            assert_eq!(value, Ok(7));
        }
        assert_eq!(calls.get(), 2, "Second success should be served from cache");
    }

    #[test]
    fn test_zero_ttl_disables_caching() {
        let cache = MemoCache::new(16, Duration::ZERO);
        cache.insert(key("a"), 1u32);
        assert!(cache.is_empty());
    }
}
