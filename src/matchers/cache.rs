//! Bounded LRU + TTL result cache shared by the matcher layer (§4.5 Result
//! cache). Single-owner, protected by a mutex: critical sections are tiny
//! and concurrent matcher calls are rare (§9 Design Notes).

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

use lru::LruCache;

use crate::types::MatchResult;

/// Cache key: `(query, threshold, strategy-set)` per §4.5. `threshold` is
/// stored as milli-units so the key can derive `Eq`/`Hash` over an `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchCacheKey {
    query: String,
    threshold_milli: u32,
    strategies: Vec<String>,
}

impl MatchCacheKey {
    pub fn new(query: &str, threshold: f64, mut strategies: Vec<String>) -> Self {
        strategies.sort();
        Self {
            query: query.to_string(),
            threshold_milli: (threshold.clamp(0.0, 1.0) * 1000.0).round() as u32,
            strategies,
        }
    }
}

struct Entry {
    results: Vec<MatchResult>,
    inserted_at: Instant,
}

/// LRU cache of match results with a fixed TTL. Expired entries are treated
/// as misses and evicted on next access.
pub struct MatcherCache {
    inner: Mutex<LruCache<MatchCacheKey, Entry>>,
    ttl: Duration,
}

impl MatcherCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity must be nonzero");
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
            ttl,
        }
    }

    pub fn get(&self, key: &MatchCacheKey) -> Option<Vec<MatchResult>> {
        let mut guard = self.inner.lock().expect("matcher cache lock poisoned");
        let expired = match guard.get(key) {
            Some(entry) if entry.inserted_at.elapsed() <= self.ttl => {
                return Some(entry.results.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            guard.pop(key);
        }
        None
    }

    pub fn put(&self, key: MatchCacheKey, results: Vec<MatchResult>) {
        let mut guard = self.inner.lock().expect("matcher cache lock poisoned");
        guard.put(
            key,
            Entry {
                results,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Invalidates every entry; called when the identifier universe changes
    /// (§4.5: "the cache is invalidated when the identifier universe changes").
    pub fn clear(&self) {
        self.inner.lock().expect("matcher cache lock poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("matcher cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rough byte estimate for statistics (§4.5: "cache memory usage is
    /// estimated and exposed in statistics").
    pub fn estimated_bytes(&self) -> usize {
        let guard = self.inner.lock().expect("matcher cache lock poisoned");
        guard
            .iter()
            .map(|(key, entry)| {
                let key_bytes = key.query.len() + key.strategies.iter().map(String::len).sum::<usize>();
                let result_bytes = entry.results.len() * std::mem::size_of::<MatchResult>();
                key_bytes + result_bytes
            })
            .sum()
    }
}

#[cfg(test)]
#[path = "cache.test.rs"]
mod tests;
