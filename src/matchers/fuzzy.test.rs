use super::*;

fn options(strategies: &[FuzzyStrategy]) -> MatchOptions {
    MatchOptions {
        threshold: 0.7,
        max_results: 10,
        strategies: strategies.iter().copied().collect(),
    }
}

#[test]
fn exact_match_scores_one() {
    let universe = vec!["RepoMap".to_string()];
    let opts = options(&[FuzzyStrategy::Exact]);
    let results = fuzzy_match("repomap", &universe, &opts);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 1.0);
}

#[test]
fn prefix_beats_threshold_and_ties_broken_lexicographically() {
    let universe = vec![
        "DockerRepoMap".to_string(),
        "docker_build".to_string(),
        "RepoMap".to_string(),
    ];
    let opts = options(&[FuzzyStrategy::Prefix, FuzzyStrategy::Substring]);
    let results = fuzzy_match("Docker", &universe, &opts);

    let names: Vec<&str> = results.iter().map(|r| r.identifier.as_str()).collect();
    assert!(names.contains(&"DockerRepoMap"));
    assert!(names.contains(&"docker_build"));
    assert!(!names.contains(&"RepoMap"));
    // 'D' < 'd' under byte ordering, so DockerRepoMap sorts first on a tie.
    assert_eq!(names[0], "DockerRepoMap");
}

#[test]
fn empty_strategy_set_falls_back_to_substring() {
    let universe = vec!["docker_build".to_string()];
    let opts = MatchOptions {
        threshold: 0.5,
        max_results: 10,
        strategies: HashSet::new(),
    };
    let results = fuzzy_match("docker", &universe, &opts);
    assert_eq!(results.len(), 1);
}

#[test]
fn empty_query_returns_no_results() {
    let universe = vec!["docker_build".to_string()];
    let opts = options(&[FuzzyStrategy::Substring]);
    assert!(fuzzy_match("", &universe, &opts).is_empty());
}

#[test]
fn max_results_truncates_after_sort() {
    let universe = vec![
        "docker_a".to_string(),
        "docker_b".to_string(),
        "docker_c".to_string(),
    ];
    let opts = MatchOptions {
        threshold: 0.1,
        max_results: 2,
        strategies: [FuzzyStrategy::Prefix].into_iter().collect(),
    };
    let results = fuzzy_match("docker", &universe, &opts);
    assert_eq!(results.len(), 2);
}

#[test]
fn levenshtein_strategy_admits_near_misses() {
    let universe = vec!["docker".to_string()];
    let opts = MatchOptions {
        threshold: 0.7,
        max_results: 10,
        strategies: [FuzzyStrategy::Levenshtein].into_iter().collect(),
    };
    let results = fuzzy_match("dcoker", &universe, &opts);
    assert_eq!(results.len(), 1);
}

#[test]
fn word_strategy_uses_jaccard_similarity() {
    let universe = vec!["user_score_calculator".to_string()];
    let opts = MatchOptions {
        threshold: 0.3,
        max_results: 10,
        strategies: [FuzzyStrategy::Word].into_iter().collect(),
    };
    let results = fuzzy_match("user score", &universe, &opts);
    assert_eq!(results.len(), 1);
}

#[test]
fn all_scores_are_clamped_to_unit_interval() {
    let universe = vec!["averyveryverylongidentifierthatexceedsnormalbounds".to_string()];
    let opts = options(&[
        FuzzyStrategy::Prefix,
        FuzzyStrategy::Suffix,
        FuzzyStrategy::Substring,
    ]);
    let results = fuzzy_match("averyveryverylongidentifierthatexceedsnormalbounds", &universe, &opts);
    for r in &results {
        assert!((0.0..=1.0).contains(&r.score));
    }
}
