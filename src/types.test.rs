use super::*;
use pretty_assertions::assert_eq;

#[test]
fn language_dispatches_on_extension() {
    assert_eq!(Language::from_extension("py"), Some(Language::Python));
    assert_eq!(Language::from_extension("TSX"), Some(Language::TypeScript));
    assert_eq!(Language::from_extension("rs"), None);
}

#[test]
fn language_dispatches_on_path() {
    let path = std::path::Path::new("src/main.go");
    assert_eq!(Language::from_path(path), Some(Language::Go));
}

#[test]
fn match_result_clamps_out_of_range_score() {
    let m = MatchResult {
        identifier: "foo".to_string(),
        score: 1.4,
        strategy: "prefix".to_string(),
        kind: MatchKind::Fuzzy,
        path: None,
        line: None,
        context: None,
    }
    .clamp_score();
    assert_eq!(m.score, 1.0);
}

#[test]
fn sort_match_results_orders_by_score_desc_then_identifier_asc() {
    let mut results = vec![
        MatchResult {
            identifier: "zeta".to_string(),
            score: 0.9,
            strategy: "prefix".to_string(),
            kind: MatchKind::Fuzzy,
            path: None,
            line: None,
            context: None,
        },
        MatchResult {
            identifier: "alpha".to_string(),
            score: 0.9,
            strategy: "prefix".to_string(),
            kind: MatchKind::Fuzzy,
            path: None,
            line: None,
            context: None,
        },
        MatchResult {
            identifier: "beta".to_string(),
            score: 0.95,
            strategy: "prefix".to_string(),
            kind: MatchKind::Fuzzy,
            path: None,
            line: None,
            context: None,
        },
    ];
    sort_match_results(&mut results);
    let names: Vec<&str> = results.iter().map(|r| r.identifier.as_str()).collect();
    assert_eq!(names, vec!["beta", "alpha", "zeta"]);
}

#[test]
fn dependency_node_starts_with_empty_adjacency() {
    let node = DependencyNode::new(PathBuf::from("a.py"));
    assert!(node.imports.is_empty());
    assert!(node.imported_by.is_empty());
}
