use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::models::ScoredListing;

/// Bound on memoized match results before eviction kicks in
pub const DEFAULT_MATCH_CACHE_CAPACITY: usize = 50;

/// Bounded memoization cache for compatibility-retrieval results
///
/// Keyed by requirement identity plus candidate-pool size. Entries beyond
/// the capacity evict least-recently-used. The mutex makes the cache safe
/// under the server's threaded workers; lookups hand out clones, so a
/// caller mutating its result can never corrupt a cached entry.
#[derive(Clone)]
pub struct MatchCache {
    inner: Arc<Mutex<LruCache<String, Vec<ScoredListing>>>>,
}

impl std::fmt::Debug for MatchCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCache")
            .field("entries", &self.len())
            .finish()
    }
}

impl MatchCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Copy of a cached result, never the cached vector itself
    pub fn get(&self, key: &str) -> Option<Vec<ScoredListing>> {
        let mut cache = self.lock();
        let hit = cache.get(key).cloned();
        if hit.is_some() {
            tracing::trace!("match cache hit: {}", key);
        }
        hit
    }

    pub fn put(&self, key: String, value: Vec<ScoredListing>) {
        self.lock().put(key, value);
        tracing::trace!("match cache store");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<String, Vec<ScoredListing>>> {
        // A poisoned lock only means a panic elsewhere mid-access; the map
        // itself is still coherent
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MatchCache {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_CACHE_CAPACITY)
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a match-retrieval result: requirement identity + pool size
    pub fn matches(requirement_id: &str, pool_size: usize) -> String {
        format!("matches:{}:{}", requirement_id, pool_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VesselListing;
    use chrono::NaiveDate;

    fn scored(name: &str, score: f64) -> ScoredListing {
        ScoredListing {
            listing: VesselListing {
                name: name.to_string(),
                imo: "9700000".to_string(),
                flag: "Panama".to_string(),
                built_year: 2015,
                dwt: 76000.0,
                vessel_type: Some("Panamax".to_string()),
                open_port: "Qingdao".to_string(),
                discharge_port: None,
                laycan_start: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                laycan_end: NaiveDate::from_ymd_opt(2026, 6, 10).unwrap(),
                freight_rate: 20.0,
                rate_unit: "k/day".to_string(),
                cargo_type: None,
                cargo_quantity: None,
                gear: None,
                ice_class: None,
                special_clauses: None,
                charterer_preference: None,
            },
            match_score: score,
        }
    }

    #[test]
    fn test_cache_set_get() {
        let cache = MatchCache::new(10);
        let key = CacheKey::matches("req-1", 5);

        cache.put(key.clone(), vec![scored("Ocean Glory", 85.0)]);

        let hit = cache.get(&key).expect("entry was just stored");
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].listing.name, "Ocean Glory");
        assert!(cache.get(&CacheKey::matches("req-1", 6)).is_none());
    }

    #[test]
    fn test_cache_returns_copies() {
        let cache = MatchCache::new(10);
        let key = CacheKey::matches("req-1", 1);
        cache.put(key.clone(), vec![scored("Ocean Glory", 85.0)]);

        let mut first = cache.get(&key).unwrap();
        first.clear();

        let second = cache.get(&key).unwrap();
        assert_eq!(second.len(), 1, "caller mutation must not reach the cache");
    }

    #[test]
    fn test_cache_evicts_at_capacity() {
        let cache = MatchCache::new(2);
        cache.put(CacheKey::matches("a", 1), vec![]);
        cache.put(CacheKey::matches("b", 1), vec![]);
        cache.put(CacheKey::matches("c", 1), vec![]);

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&CacheKey::matches("a", 1)).is_none());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::matches("req-42", 7), "matches:req-42:7");
    }
}
