//! Semantic (TF-IDF) identifier matcher (§4.5).

use std::collections::HashMap;
use std::collections::HashSet;

use crate::terms::split_identifier_terms;
use crate::types::MatchKind;
use crate::types::MatchResult;
use crate::types::sort_match_results;

/// Options for the semantic matcher.
#[derive(Debug, Clone)]
pub struct SemanticOptions {
    pub threshold: f64,
    pub max_results: usize,
    pub min_word_length: usize,
}

/// A sparse TF-IDF vector, keyed by vocabulary term.
type Vector = HashMap<String, f64>;

/// Builds a TF-IDF vector space over the tokenized identifier universe and
/// scores `query` against it by cosine similarity (§4.5 semantic matcher).
///
/// Returns no results if the universe is empty or tokenizes to an empty
/// vocabulary.
pub fn semantic_match(query: &str, universe: &[String], options: &SemanticOptions) -> Vec<MatchResult> {
    if universe.is_empty() {
        return Vec::new();
    }

    let tokenized: Vec<(String, Vec<String>)> = universe
        .iter()
        .map(|ident| (ident.clone(), tokenize(ident, options.min_word_length)))
        .collect();

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for (_, tokens) in &tokenized {
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    if document_frequency.is_empty() {
        return Vec::new();
    }

    let doc_count = tokenized.len() as f64;
    let idf = |term: &str| -> f64 {
        let df = document_frequency.get(term).copied().unwrap_or(0) as f64;
        ((doc_count + 1.0) / (df + 1.0)).ln() + 1.0
    };

    let identifier_vectors: Vec<(String, Vector)> = tokenized
        .iter()
        .map(|(ident, tokens)| (ident.clone(), tfidf_vector(tokens, &idf)))
        .collect();

    let query_tokens = tokenize(query, options.min_word_length);
    if query_tokens.is_empty() {
        return Vec::new();
    }
    let query_vector = tfidf_vector(&query_tokens, &idf);

    let mut results = Vec::new();
    for (identifier, vector) in &identifier_vectors {
        let score = cosine_similarity(&query_vector, vector).clamp(0.0, 1.0);
        if score >= options.threshold {
            results.push(MatchResult {
                identifier: identifier.clone(),
                score,
                strategy: "semantic".to_string(),
                kind: MatchKind::Semantic,
                path: None,
                line: None,
                context: None,
            });
        }
    }

    sort_match_results(&mut results);
    results.truncate(options.max_results);
    results
}

fn tokenize(ident: &str, min_word_length: usize) -> Vec<String> {
    split_identifier_terms(ident)
        .into_iter()
        .filter(|t| t.len() >= min_word_length)
        .collect()
}

fn tfidf_vector(tokens: &[String], idf: &impl Fn(&str) -> f64) -> Vector {
    let mut term_frequency: HashMap<String, f64> = HashMap::new();
    for token in tokens {
        *term_frequency.entry(token.clone()).or_insert(0.0) += 1.0;
    }
    let total = tokens.len().max(1) as f64;
    term_frequency
        .into_iter()
        .map(|(term, count)| {
            let tf = count / total;
            let weight = tf * idf(&term);
            (term, weight)
        })
        .collect()
}

fn cosine_similarity(a: &Vector, b: &Vector) -> f64 {
    let dot: f64 = a.iter().map(|(term, weight)| weight * b.get(term).copied().unwrap_or(0.0)).sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
#[path = "semantic.test.rs"]
mod tests;
