//! Fuzzy identifier matcher (§4.5).

use std::collections::HashSet;

use crate::config::FuzzyStrategy;
use crate::terms::split_identifier_terms;
use crate::types::MatchKind;
use crate::types::MatchResult;
use crate::types::sort_match_results;

/// Options shared by every matcher strategy (§4.5 common contract).
#[derive(Debug, Clone)]
pub struct MatchOptions {
    pub threshold: f64,
    pub max_results: usize,
    pub strategies: HashSet<FuzzyStrategy>,
}

/// Scores `query` against every identifier in `universe`, keeping the
/// per-identifier maximum over the enabled strategies (§4.5 fuzzy matcher).
///
/// An empty strategy set behaves as `{substring}` (§9 Open Question,
/// resolved): the "basic" fallback search exists for exactly this case.
pub fn fuzzy_match(query: &str, universe: &[String], options: &MatchOptions) -> Vec<MatchResult> {
    if query.is_empty() {
        return Vec::new();
    }

    let strategies: HashSet<FuzzyStrategy> = if options.strategies.is_empty() {
        HashSet::from([FuzzyStrategy::Substring])
    } else {
        options.strategies.clone()
    };

    let query_lower = query.to_lowercase();
    let query_terms: HashSet<String> = split_identifier_terms(query).into_iter().collect();

    let mut results: Vec<MatchResult> = Vec::new();
    for identifier in universe {
        let score = score_identifier(identifier, &query_lower, &query_terms, &strategies, options.threshold);
        if let Some(score) = score
            && score >= options.threshold
        {
            results.push(
                MatchResult {
                    identifier: identifier.clone(),
                    score,
                    strategy: "fuzzy".to_string(),
                    kind: MatchKind::Fuzzy,
                    path: None,
                    line: None,
                    context: None,
                }
                .clamp_score(),
            );
        }
    }

    sort_match_results(&mut results);
    results.truncate(options.max_results);
    results
}

fn score_identifier(
    identifier: &str,
    query_lower: &str,
    query_terms: &HashSet<String>,
    strategies: &HashSet<FuzzyStrategy>,
    threshold: f64,
) -> Option<f64> {
    let identifier_lower = identifier.to_lowercase();
    let mut best: Option<f64> = None;
    let mut consider = |score: f64| {
        best = Some(best.map_or(score, |b: f64| b.max(score)));
    };

    if strategies.contains(&FuzzyStrategy::Exact) && identifier_lower == query_lower {
        consider(1.0);
    }
    if strategies.contains(&FuzzyStrategy::Prefix) && identifier_lower.starts_with(query_lower) {
        consider((0.70 + 0.02 * query_lower.len() as f64).min(0.95));
    }
    if strategies.contains(&FuzzyStrategy::Suffix) && identifier_lower.ends_with(query_lower) {
        consider((0.65 + 0.02 * query_lower.len() as f64).min(0.90));
    }
    if strategies.contains(&FuzzyStrategy::Substring)
        && let Some(pos) = identifier_lower.find(query_lower)
    {
        let proximity_bonus = (10 - pos.min(10)) as f64 / 100.0;
        consider((0.60 + 0.02 * query_lower.len() as f64 + proximity_bonus).min(0.85));
    }
    if strategies.contains(&FuzzyStrategy::Levenshtein) {
        let score = levenshtein_family_score(&identifier_lower, query_lower);
        if score >= threshold {
            consider(score);
        }
    }
    if strategies.contains(&FuzzyStrategy::Word) {
        let score = word_jaccard(identifier, query_terms);
        if score >= threshold {
            consider(score);
        }
    }

    best
}

/// Max of {ratio, partial ratio, token-sort ratio, token-set ratio} (§4.5).
fn levenshtein_family_score(a: &str, b: &str) -> f64 {
    levenshtein_ratio(a, b)
        .max(partial_ratio(a, b))
        .max(token_sort_ratio(a, b))
        .max(token_set_ratio(a, b))
}

fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Best-matching-substring ratio: slides the shorter string across the
/// longer one and keeps the best alignment (fuzzywuzzy's `partial_ratio`).
fn partial_ratio(a: &str, b: &str) -> f64 {
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() {
        return 0.0;
    }
    if longer.len() <= shorter.len() {
        return levenshtein_ratio(shorter, longer);
    }

    let longer_chars: Vec<char> = longer.chars().collect();
    let shorter_len = shorter.chars().count();
    let mut best = 0.0_f64;
    for start in 0..=(longer_chars.len() - shorter_len) {
        let window: String = longer_chars[start..start + shorter_len].iter().collect();
        best = best.max(levenshtein_ratio(shorter, &window));
    }
    best
}

fn sorted_tokens(s: &str) -> Vec<String> {
    let mut terms = split_identifier_terms(s);
    terms.sort();
    terms
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let sorted_a = sorted_tokens(a).join(" ");
    let sorted_b = sorted_tokens(b).join(" ");
    levenshtein_ratio(&sorted_a, &sorted_b)
}

/// fuzzywuzzy's `token_set_ratio`: compares the shared-token intersection
/// against each side's full token set, taking the best alignment.
fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = split_identifier_terms(a).into_iter().collect();
    let tokens_b: HashSet<String> = split_identifier_terms(b).into_iter().collect();

    let mut intersection: Vec<&String> = tokens_a.intersection(&tokens_b).collect();
    let mut only_a: Vec<&String> = tokens_a.difference(&tokens_b).collect();
    let mut only_b: Vec<&String> = tokens_b.difference(&tokens_a).collect();
    intersection.sort();
    only_a.sort();
    only_b.sort();

    let join = |v: &[&String]| v.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(" ");
    let t = join(&intersection);
    let t_a = if t.is_empty() {
        join(&only_a)
    } else {
        format!("{t} {}", join(&only_a))
    };
    let t_b = if t.is_empty() {
        join(&only_b)
    } else {
        format!("{t} {}", join(&only_b))
    };

    levenshtein_ratio(&t, &t_a)
        .max(levenshtein_ratio(&t, &t_b))
        .max(levenshtein_ratio(&t_a, &t_b))
}

/// Jaccard similarity of the identifier's tokens against the query's tokens
/// (§4.5 `word` strategy).
fn word_jaccard(identifier: &str, query_terms: &HashSet<String>) -> f64 {
    if query_terms.is_empty() {
        return 0.0;
    }
    let identifier_terms: HashSet<String> = split_identifier_terms(identifier).into_iter().collect();
    if identifier_terms.is_empty() {
        return 0.0;
    }
    let intersection = identifier_terms.intersection(query_terms).count();
    let union = identifier_terms.union(query_terms).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
#[path = "fuzzy.test.rs"]
mod tests;
