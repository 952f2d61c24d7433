use super::*;
use crate::types::MatchKind;

fn universe() -> Vec<String> {
    vec![
        "DockerRepoMap".to_string(),
        "docker_build".to_string(),
        "RepoMap".to_string(),
    ]
}

fn request(query: &str, kind: MatchKind, max_results: usize) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        kind,
        threshold: 0.7,
        max_results,
    }
}

#[test]
fn respects_max_results_and_threshold_invariant() {
    let matchers = IdentifierMatchers::new(100, Duration::from_secs(60));
    let config = Config::new("/tmp");
    let response = matchers.search(request("Docker", MatchKind::Fuzzy, 1), &universe(), &config);
    assert!(response.results.len() <= response.request.max_results);
    for r in &response.results {
        assert!(r.score >= response.request.threshold);
    }
}

#[test]
fn second_identical_request_is_a_cache_hit() {
    let matchers = IdentifierMatchers::new(100, Duration::from_secs(60));
    let config = Config::new("/tmp");
    let first = matchers.search(request("Docker", MatchKind::Fuzzy, 10), &universe(), &config);
    assert!(!first.cache_hit);
    let second = matchers.search(request("Docker", MatchKind::Fuzzy, 10), &universe(), &config);
    assert!(second.cache_hit);
    assert_eq!(first.results, second.results);
}

#[test]
fn invalidate_clears_the_cache() {
    let matchers = IdentifierMatchers::new(100, Duration::from_secs(60));
    let config = Config::new("/tmp");
    matchers.search(request("Docker", MatchKind::Fuzzy, 10), &universe(), &config);
    assert_eq!(matchers.cache_len(), 1);
    matchers.invalidate();
    assert_eq!(matchers.cache_len(), 0);
}

#[test]
fn empty_query_returns_empty_response() {
    let matchers = IdentifierMatchers::new(100, Duration::from_secs(60));
    let config = Config::new("/tmp");
    let response = matchers.search(request("", MatchKind::Fuzzy, 10), &universe(), &config);
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
}
