use std::time::Duration;

use super::*;
use crate::types::MatchKind;

fn result(identifier: &str, score: f64) -> MatchResult {
    MatchResult {
        identifier: identifier.to_string(),
        score,
        strategy: "exact".to_string(),
        kind: MatchKind::Fuzzy,
        path: None,
        line: None,
        context: None,
    }
}

#[test]
fn put_then_get_round_trips() {
    let cache = MatcherCache::new(100, Duration::from_secs(60));
    let key = MatchCacheKey::new("docker", 0.7, vec!["prefix".to_string()]);
    cache.put(key.clone(), vec![result("DockerRepoMap", 0.9)]);
    let hit = cache.get(&key).expect("expected cache hit");
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].identifier, "DockerRepoMap");
}

#[test]
fn miss_on_unknown_key() {
    let cache = MatcherCache::new(100, Duration::from_secs(60));
    let key = MatchCacheKey::new("docker", 0.7, vec![]);
    assert!(cache.get(&key).is_none());
}

#[test]
fn expired_entries_are_treated_as_misses() {
    let cache = MatcherCache::new(100, Duration::from_millis(1));
    let key = MatchCacheKey::new("docker", 0.7, vec![]);
    cache.put(key.clone(), vec![result("docker_build", 0.8)]);
    std::thread::sleep(Duration::from_millis(20));
    assert!(cache.get(&key).is_none());
    assert!(cache.is_empty());
}

#[test]
fn key_is_order_insensitive_over_strategies() {
    let a = MatchCacheKey::new("x", 0.5, vec!["b".to_string(), "a".to_string()]);
    let b = MatchCacheKey::new("x", 0.5, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(a, b);
}

#[test]
fn clear_empties_the_cache() {
    let cache = MatcherCache::new(100, Duration::from_secs(60));
    let key = MatchCacheKey::new("docker", 0.7, vec![]);
    cache.put(key, vec![result("docker_build", 0.8)]);
    cache.clear();
    assert!(cache.is_empty());
}
