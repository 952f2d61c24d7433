use super::*;
use crate::config::FuzzyStrategy;

fn options() -> HybridOptions {
    HybridOptions {
        fuzzy: MatchOptions {
            threshold: 0.0,
            max_results: 50,
            strategies: [FuzzyStrategy::Prefix, FuzzyStrategy::Substring].into_iter().collect(),
        },
        semantic: SemanticOptions {
            threshold: 0.0,
            max_results: 50,
            min_word_length: 3,
        },
        threshold: 0.1,
        max_results: 10,
    }
}

#[test]
fn combines_as_max_of_components() {
    let universe = vec!["DockerRepoMap".to_string(), "unrelated_thing".to_string()];
    let results = hybrid_match("Docker", &universe, &options());
    assert_eq!(results[0].identifier, "DockerRepoMap");
    assert!(results[0].context.as_ref().unwrap().contains("fuzzy="));
}

#[test]
fn reports_the_winning_strategy_label() {
    let universe = vec!["calculate_user_score".to_string()];
    let results = hybrid_match("user score calculate", &universe, &options());
    assert_eq!(results.len(), 1);
    assert!(results[0].strategy == "fuzzy" || results[0].strategy == "semantic");
}

#[test]
fn below_threshold_results_are_dropped() {
    let universe = vec!["zzz".to_string()];
    let mut opts = options();
    opts.threshold = 0.99;
    let results = hybrid_match("docker", &universe, &opts);
    assert!(results.is_empty());
}

#[test]
fn scores_stay_within_unit_interval() {
    let universe = vec!["DockerRepoMap".to_string()];
    let results = hybrid_match("DockerRepoMap", &universe, &options());
    for r in &results {
        assert!((0.0..=1.0).contains(&r.score));
    }
}

