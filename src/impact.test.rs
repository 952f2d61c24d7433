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

/// a.py -> b.py -> c.py (c.py is the most widely depended-upon)
fn chain_graph() -> DependencyGraph {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![import("c.py")]));
    imports.insert(PathBuf::from("c.py"), file_imports("c.py", vec![]));
    DependencyGraph::build(&imports, &HashMap::new(), 100).0
}

#[test]
fn direct_and_transitive_dependents_of_sink() {
    let graph = chain_graph();
    let centrality = HashMap::new();
    let analyzer = ImpactAnalyzer::new(&graph, &centrality);

    let changed = BTreeSet::from([PathBuf::from("c.py")]);
    let report = analyzer.analyze(&changed);

    assert_eq!(report.direct_dependents, BTreeSet::from([PathBuf::from("b.py")]));
    assert_eq!(
        report.transitive_dependents,
        BTreeSet::from([PathBuf::from("b.py"), PathBuf::from("a.py")])
    );
}

#[test]
fn leaf_change_has_no_dependents() {
    let graph = chain_graph();
    let centrality = HashMap::new();
    let analyzer = ImpactAnalyzer::new(&graph, &centrality);

    let changed = BTreeSet::from([PathBuf::from("a.py")]);
    let report = analyzer.analyze(&changed);

    assert!(report.direct_dependents.is_empty());
    assert!(report.transitive_dependents.is_empty());
    assert_eq!(report.risk_score, 0.0);
}

#[test]
fn unknown_file_yields_empty_report_without_panicking() {
    let graph = chain_graph();
    let centrality = HashMap::new();
    let analyzer = ImpactAnalyzer::new(&graph, &centrality);

    let changed = BTreeSet::from([PathBuf::from("missing.py")]);
    let report = analyzer.analyze(&changed);

    assert!(report.direct_dependents.is_empty());
    assert!(report.details.is_empty());
    assert_eq!(report.risk_score, 0.0);
}

#[test]
fn risk_score_is_bounded_to_unit_interval() {
    let graph = chain_graph();
    let mut centrality = HashMap::new();
    centrality.insert(PathBuf::from("c.py"), 1.0);
    let analyzer = ImpactAnalyzer::new(&graph, &centrality);

    let changed = BTreeSet::from([PathBuf::from("c.py")]);
    let report = analyzer.analyze(&changed);
    assert!((0.0..=1.0).contains(&report.risk_score));
}

#[test]
fn detail_flags_high_centrality_as_critical() {
    let graph = chain_graph();
    let mut centrality = HashMap::new();
    centrality.insert(PathBuf::from("c.py"), 0.9);
    let analyzer = ImpactAnalyzer::new(&graph, &centrality);

    let changed = BTreeSet::from([PathBuf::from("c.py")]);
    let report = analyzer.analyze(&changed);
    let detail = report.details.iter().find(|d| d.path == PathBuf::from("c.py")).unwrap();
    assert_eq!(detail.risk, RiskLevel::Critical);
    assert_eq!(detail.fan_in, 1);
}

#[test]
fn suggests_matching_test_files_by_naming_convention() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("src/util.py"), file_imports("src/util.py", vec![]));
    imports.insert(PathBuf::from("src/test_util.py"), file_imports("src/test_util.py", vec![]));
    imports.insert(PathBuf::from("src/other.py"), file_imports("src/other.py", vec![]));
    let (graph, _) = DependencyGraph::build(&imports, &HashMap::new(), 100);

    let centrality = HashMap::new();
    let analyzer = ImpactAnalyzer::new(&graph, &centrality);
    let changed = BTreeSet::from([PathBuf::from("src/util.py")]);
    let report = analyzer.analyze(&changed);

    assert_eq!(report.suggested_tests, vec![PathBuf::from("src/test_util.py")]);
}

#[test]
fn is_test_file_recognizes_common_conventions() {
    assert!(is_test_file(Path::new("test_util.py")));
    assert!(is_test_file(Path::new("util_test.go")));
    assert!(!is_test_file(Path::new("util.py")));
}
