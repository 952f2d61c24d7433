use super::*;
use crate::types::FileImports;
use crate::types::Import;
use crate::types::ImportKind;
use crate::types::Language;
use std::collections::HashMap;

fn import(resolved: &str) -> Import {
    Import {
        module: resolved.to_string(),
        alias: None,
        symbols: Vec::new(),
        is_relative: true,
        relative_level: 1,
        kind: ImportKind::Relative,
        line: 1,
        resolved_path: Some(PathBuf::from(resolved)),
    }
}

fn file_imports(path: &str, imports: Vec<Import>) -> FileImports {
    FileImports {
        path: PathBuf::from(path),
        imports,
        language: Language::Python,
    }
}

fn chain_graph() -> DependencyGraph {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![import("c.py")]));
    imports.insert(PathBuf::from("c.py"), file_imports("c.py", vec![]));
    DependencyGraph::build(&imports, &HashMap::new(), 100).0
}

fn all_algorithms() -> HashSet<CentralityAlgorithm> {
    HashSet::from([
        CentralityAlgorithm::Degree,
        CentralityAlgorithm::Betweenness,
        CentralityAlgorithm::Pagerank,
        CentralityAlgorithm::Eigenvector,
        CentralityAlgorithm::Closeness,
    ])
}

#[test]
fn degree_centrality_ranges_in_unit_interval() {
    let graph = chain_graph();
    let engine = CentralityEngine::new(&graph, HashSet::from([CentralityAlgorithm::Degree]));
    for value in engine.scores().degree.values() {
        assert!((0.0..=1.0).contains(value));
    }
}

#[test]
fn middle_node_of_chain_has_highest_betweenness() {
    let graph = chain_graph();
    let engine = CentralityEngine::new(&graph, HashSet::from([CentralityAlgorithm::Betweenness]));
    let scores = &engine.scores().betweenness;
    let b = scores[&PathBuf::from("b.py")];
    let a = scores[&PathBuf::from("a.py")];
    let c = scores[&PathBuf::from("c.py")];
    assert!(b > a && b > c, "expected b.py to bridge a.py and c.py, got {scores:?}");
}

#[test]
fn pagerank_scores_sum_close_to_one() {
    let graph = chain_graph();
    let engine = CentralityEngine::new(&graph, HashSet::from([CentralityAlgorithm::Pagerank]));
    let total: f64 = engine.scores().pagerank.values().sum();
    assert!((total - 1.0).abs() < 1e-3, "pagerank mass should conserve, got {total}");
}

#[test]
fn pagerank_sink_outranks_leaf_source() {
    let graph = chain_graph();
    let engine = CentralityEngine::new(&graph, HashSet::from([CentralityAlgorithm::Pagerank]));
    let scores = &engine.scores().pagerank;
    assert!(scores[&PathBuf::from("c.py")] > scores[&PathBuf::from("a.py")]);
}

#[test]
fn composite_contains_only_requested_algorithms() {
    let graph = chain_graph();
    let requested = HashSet::from([CentralityAlgorithm::Degree, CentralityAlgorithm::Pagerank]);
    let engine = CentralityEngine::new(&graph, requested);
    let scores = engine.scores();
    assert!(scores.contributing_algorithms.contains(&"degree".to_string()));
    assert!(scores.contributing_algorithms.contains(&"pagerank".to_string()));
    assert!(!scores.contributing_algorithms.contains(&"betweenness".to_string()));
    assert!(scores.betweenness.is_empty());
}

#[test]
fn composite_is_min_max_normalized() {
    let graph = chain_graph();
    let engine = CentralityEngine::new(&graph, all_algorithms());
    let composite = &engine.scores().composite;
    let max = composite.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = composite.values().copied().fold(f64::INFINITY, f64::min);
    assert!((max - 1.0).abs() < 1e-9 || (max - min).abs() < 1e-9);
    assert!(min >= 0.0);
}

#[test]
fn ranking_is_sorted_descending_with_lexicographic_tiebreak() {
    let graph = chain_graph();
    let engine = CentralityEngine::new(&graph, all_algorithms());
    let ranking = engine.ranking();
    assert_eq!(ranking.len(), 3);
    let scores = &engine.scores().composite;
    for window in ranking.windows(2) {
        assert!(scores[&window[0]] >= scores[&window[1]] - 1e-9);
    }
}

#[test]
fn empty_graph_yields_empty_vectors() {
    let graph = DependencyGraph::build(&HashMap::new(), &HashMap::new(), 100).0;
    let engine = CentralityEngine::new(&graph, all_algorithms());
    let scores = engine.scores();
    assert!(scores.degree.is_empty());
    assert!(scores.composite.is_empty());
}

#[test]
fn scores_are_memoized_across_calls() {
    let graph = chain_graph();
    let engine = CentralityEngine::new(&graph, all_algorithms());
    let first = engine.scores() as *const CentralityVector;
    let second = engine.scores() as *const CentralityVector;
    assert_eq!(first, second);
}
