//! Identifier matchers (C5): fuzzy, semantic, and hybrid strategies over the
//! identifier universe, each backed by a bounded LRU + TTL result cache.

pub mod cache;
pub mod fuzzy;
pub mod hybrid;
pub mod semantic;

use std::time::Duration;
use std::time::Instant;

use cache::MatchCacheKey;
use cache::MatcherCache;
use fuzzy::MatchOptions;
use fuzzy::fuzzy_match;
use hybrid::HybridOptions;
use hybrid::hybrid_match;
use semantic::SemanticOptions;
use semantic::semantic_match;

use crate::config::Config;
use crate::types::MatchKind;
use crate::types::SearchRequest;
use crate::types::SearchResponse;

/// Owns the per-strategy result caches and dispatches a [`SearchRequest`]
/// against the current identifier universe.
///
/// A matcher given an empty query returns an empty list without raising
/// (§4.5 error handling); there is no null/non-string case in a typed
/// language, so this is the full extent of that guard here.
pub struct IdentifierMatchers {
    cache: MatcherCache,
}

impl IdentifierMatchers {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: MatcherCache::new(capacity, ttl),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.perf.cache_size, Duration::from_secs(config.perf.cache_ttl_secs))
    }

    /// Invalidates every cached result. Called whenever the identifier
    /// universe changes (§4.5 Result cache).
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn cache_estimated_bytes(&self) -> usize {
        self.cache.estimated_bytes()
    }

    /// Runs `request` against `universe`, consulting (and populating) the
    /// result cache.
    pub fn search(&self, request: SearchRequest, universe: &[String], config: &Config) -> SearchResponse {
        let started = Instant::now();

        if request.query.trim().is_empty() {
            return SearchResponse {
                total: 0,
                results: Vec::new(),
                elapsed_ms: started.elapsed().as_millis() as u64,
                cache_hit: false,
                request,
            };
        }

        let strategy_labels = strategy_labels_for(request.kind, config);
        let cache_key = MatchCacheKey::new(&request.query, request.threshold, strategy_labels);

        if let Some(cached) = self.cache.get(&cache_key) {
            let total = cached.len();
            let mut results = cached;
            results.truncate(request.max_results);
            return SearchResponse {
                total,
                results,
                elapsed_ms: started.elapsed().as_millis() as u64,
                cache_hit: true,
                request,
            };
        }

        // Cache keyed on (query, threshold, strategy-set) only: compute the
        // full ranked list once and let each caller's max_results slice it.
        let full_results = match request.kind {
            MatchKind::Fuzzy => fuzzy_match(
                &request.query,
                universe,
                &MatchOptions {
                    threshold: request.threshold,
                    max_results: universe.len().max(1),
                    strategies: config.fuzzy.strategies.clone(),
                },
            ),
            MatchKind::Semantic => semantic_match(
                &request.query,
                universe,
                &SemanticOptions {
                    threshold: request.threshold,
                    max_results: universe.len().max(1),
                    min_word_length: config.semantic.min_word_length,
                },
            ),
            MatchKind::Hybrid => hybrid_match(
                &request.query,
                universe,
                &HybridOptions {
                    fuzzy: MatchOptions {
                        threshold: 0.0,
                        max_results: universe.len().max(1),
                        strategies: config.fuzzy.strategies.clone(),
                    },
                    semantic: SemanticOptions {
                        threshold: 0.0,
                        max_results: universe.len().max(1),
                        min_word_length: config.semantic.min_word_length,
                    },
                    threshold: request.threshold,
                    max_results: universe.len().max(1),
                },
            ),
        };

        self.cache.put(cache_key, full_results.clone());

        let total = full_results.len();
        let mut results = full_results;
        results.truncate(request.max_results);
        SearchResponse {
            total,
            results,
            elapsed_ms: started.elapsed().as_millis() as u64,
            cache_hit: false,
            request,
        }
    }
}

fn strategy_labels_for(kind: MatchKind, config: &Config) -> Vec<String> {
    match kind {
        MatchKind::Fuzzy | MatchKind::Hybrid => {
            config.fuzzy.strategies.iter().map(|s| format!("{s:?}")).collect()
        }
        MatchKind::Semantic => vec!["semantic".to_string()],
    }
}

#[cfg(test)]
#[path = "mod.test.rs"]
mod tests;
