use super::*;

fn options() -> SemanticOptions {
    SemanticOptions {
        threshold: 0.1,
        max_results: 10,
        min_word_length: 3,
    }
}

#[test]
fn empty_universe_returns_no_results() {
    assert!(semantic_match("score", &[], &options()).is_empty());
}

#[test]
fn scores_related_identifiers_above_unrelated() {
    let universe = vec![
        "calculate_user_score".to_string(),
        "render_html_page".to_string(),
    ];
    let results = semantic_match("user score", &universe, &options());
    assert!(!results.is_empty());
    assert_eq!(results[0].identifier, "calculate_user_score");
}

#[test]
fn scores_are_clamped_to_unit_interval() {
    let universe = vec!["calculate_user_score".to_string()];
    let results = semantic_match("calculate user score", &universe, &options());
    for r in &results {
        assert!((0.0..=1.0).contains(&r.score));
    }
}

#[test]
fn short_tokens_below_min_word_length_are_dropped() {
    let universe = vec!["ab_cd_ef".to_string()];
    let results = semantic_match("ab cd ef", &universe, &options());
    assert!(results.is_empty());
}

#[test]
fn empty_vocabulary_after_filtering_returns_no_results() {
    let universe = vec!["ab".to_string(), "cd".to_string()];
    assert!(semantic_match("ab", &universe, &options()).is_empty());
}
