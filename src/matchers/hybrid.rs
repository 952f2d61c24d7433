//! Hybrid identifier matcher: combines fuzzy and semantic scores (§4.5).

use std::collections::HashMap;

use super::fuzzy::MatchOptions;
use super::fuzzy::fuzzy_match;
use super::semantic::SemanticOptions;
use super::semantic::semantic_match;
use crate::types::MatchKind;
use crate::types::MatchResult;
use crate::types::sort_match_results;

/// Combined options for the hybrid matcher.
#[derive(Debug, Clone)]
pub struct HybridOptions {
    pub fuzzy: MatchOptions,
    pub semantic: SemanticOptions,
    pub threshold: f64,
    pub max_results: usize,
}

/// Runs both component matchers over the full universe (each with threshold
/// 0.0 so their raw scores are visible) and combines per identifier as
/// `max(fuzzy_score, semantic_score)` (§9 Open Question, resolved: "weighted
/// max" degenerates to plain max at equal weight 1.0, fixed as the default).
///
/// The reporting strategy label names whichever component produced the
/// higher score; both component scores are recorded in `context` as
/// machine-readable metadata.
pub fn hybrid_match(query: &str, universe: &[String], options: &HybridOptions) -> Vec<MatchResult> {
    let mut fuzzy_opts = options.fuzzy.clone();
    fuzzy_opts.threshold = 0.0;
    fuzzy_opts.max_results = universe.len().max(1);
    let fuzzy_results = fuzzy_match(query, universe, &fuzzy_opts);
    let fuzzy_scores: HashMap<&str, f64> = fuzzy_results
        .iter()
        .map(|r| (r.identifier.as_str(), r.score))
        .collect();

    let mut semantic_opts = options.semantic.clone();
    semantic_opts.threshold = 0.0;
    semantic_opts.max_results = universe.len().max(1);
    let semantic_results = semantic_match(query, universe, &semantic_opts);
    let semantic_scores: HashMap<&str, f64> = semantic_results
        .iter()
        .map(|r| (r.identifier.as_str(), r.score))
        .collect();

    let mut results = Vec::new();
    for identifier in universe {
        let fuzzy_score = fuzzy_scores.get(identifier.as_str()).copied().unwrap_or(0.0);
        let semantic_score = semantic_scores.get(identifier.as_str()).copied().unwrap_or(0.0);
        let combined = fuzzy_score.max(semantic_score);
        if combined < options.threshold {
            continue;
        }
        let strategy = if semantic_score > fuzzy_score { "semantic" } else { "fuzzy" };
        results.push(
            MatchResult {
                identifier: identifier.clone(),
                score: combined,
                strategy: strategy.to_string(),
                kind: MatchKind::Hybrid,
                path: None,
                line: None,
                context: Some(format!("fuzzy={fuzzy_score:.4},semantic={semantic_score:.4}")),
            }
            .clamp_score(),
        );
    }

    sort_match_results(&mut results);
    results.truncate(options.max_results);
    results
}

#[cfg(test)]
#[path = "hybrid.test.rs"]
mod tests;
