use super::*;
use crate::types::Import;
use crate::types::ImportKind;
use crate::types::Language;
use crate::types::Tag;
use crate::types::TagKind;
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

fn tag(name: &str, kind: TagKind, path: &str) -> Tag {
    Tag {
        name: name.to_string(),
        kind,
        path: PathBuf::from(path),
        line: 1,
        language: Some(Language::Python),
    }
}

fn file_tags(path: &str, tags: Vec<Tag>) -> FileTags {
    FileTags {
        path: PathBuf::from(path),
        tags,
        mtime_secs: 0,
        size_bytes: 0,
    }
}

#[test]
fn build_links_imports_bidirectionally() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![]));

    let (graph, diagnostics) = DependencyGraph::build(&imports, &HashMap::new(), 100);
    assert!(diagnostics.is_empty());
    assert_eq!(graph.node_count(), 2);
    assert_eq!(
        graph.dependencies(Path::new("a.py")),
        BTreeSet::from([PathBuf::from("b.py")])
    );
    assert_eq!(
        graph.dependents(Path::new("b.py")),
        BTreeSet::from([PathBuf::from("a.py")])
    );
}

#[test]
fn self_import_is_dropped() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("a.py")]));

    let (graph, _) = DependencyGraph::build(&imports, &HashMap::new(), 100);
    assert!(graph.dependencies(Path::new("a.py")).is_empty());
}

#[test]
fn unresolved_import_is_not_an_edge() {
    let mut import_without_target = import("b.py");
    import_without_target.resolved_path = None;

    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import_without_target]));

    let (graph, _) = DependencyGraph::build(&imports, &HashMap::new(), 100);
    assert!(graph.dependencies(Path::new("a.py")).is_empty());
}

#[test]
fn missing_path_returns_empty_not_panic() {
    let (graph, _) = DependencyGraph::build(&HashMap::new(), &HashMap::new(), 100);
    assert!(graph.dependencies(Path::new("nope.py")).is_empty());
    assert!(graph.dependents(Path::new("nope.py")).is_empty());
    assert!(graph.neighbors(Path::new("nope.py"), 2).is_empty());
}

#[test]
fn neighbors_radius_zero_excludes_self_and_grows_with_radius() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![import("c.py")]));
    imports.insert(PathBuf::from("c.py"), file_imports("c.py", vec![]));

    let (graph, _) = DependencyGraph::build(&imports, &HashMap::new(), 100);
    assert!(graph.neighbors(Path::new("a.py"), 0).is_empty());
    assert_eq!(
        graph.neighbors(Path::new("a.py"), 1),
        BTreeSet::from([PathBuf::from("b.py")])
    );
    assert_eq!(
        graph.neighbors(Path::new("a.py"), 2),
        BTreeSet::from([PathBuf::from("b.py"), PathBuf::from("c.py")])
    );
}

#[test]
fn find_cycles_detects_a_b_cycle() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![import("a.py")]));

    let (graph, _) = DependencyGraph::build(&imports, &HashMap::new(), 100);
    let cycles = graph.find_cycles();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 2);
}

#[test]
fn acyclic_graph_has_no_cycles() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![]));

    let (graph, _) = DependencyGraph::build(&imports, &HashMap::new(), 100);
    assert!(graph.find_cycles().is_empty());
}

#[test]
fn statistics_counts_roots_and_leaves() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![]));

    let (graph, _) = DependencyGraph::build(&imports, &HashMap::new(), 100);
    let stats = graph.statistics();
    assert_eq!(stats.node_count, 2);
    assert_eq!(stats.edge_count, 1);
    assert_eq!(stats.cycle_count, 0);
    assert_eq!(stats.root_count, 1);
    assert_eq!(stats.leaf_count, 1);
}

#[test]
fn build_truncates_to_max_graph_size_with_diagnostic() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![]));

    let (graph, diagnostics) = DependencyGraph::build(&imports, &HashMap::new(), 1);
    assert_eq!(graph.node_count(), 1);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn populates_defined_functions_and_classes_from_definition_tags() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![]));

    let mut tags = HashMap::new();
    tags.insert(
        PathBuf::from("a.py"),
        file_tags(
            "a.py",
            vec![
                tag("calculate_score", TagKind::Definition, "a.py"),
                tag("ScoreCalculator", TagKind::Definition, "a.py"),
                tag("threshold", TagKind::Reference, "a.py"),
            ],
        ),
    );

    let (graph, _) = DependencyGraph::build(&imports, &tags, 100);
    let node = graph.node(Path::new("a.py")).expect("node present");
    assert_eq!(node.defined_functions, vec!["calculate_score".to_string()]);
    assert_eq!(node.defined_classes, vec!["ScoreCalculator".to_string()]);
}

#[test]
fn edge_weight_defaults_to_one_without_symbol_evidence() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![]));

    let (graph, _) = DependencyGraph::build(&imports, &HashMap::new(), 100);
    assert_eq!(graph.edge_weight(Path::new("a.py"), Path::new("b.py")), Some(1.0));
    assert_eq!(graph.edge_weight(Path::new("b.py"), Path::new("a.py")), None);
}

#[test]
fn edge_weight_boosted_by_well_named_shared_symbol() {
    let mut imports = HashMap::new();
    imports.insert(PathBuf::from("a.py"), file_imports("a.py", vec![import("b.py")]));
    imports.insert(PathBuf::from("b.py"), file_imports("b.py", vec![]));

    let mut tags = HashMap::new();
    tags.insert(
        PathBuf::from("a.py"),
        file_tags("a.py", vec![tag("calculate_user_score", TagKind::Reference, "a.py")]),
    );
    tags.insert(
        PathBuf::from("b.py"),
        file_tags(
            "b.py",
            vec![tag("calculate_user_score", TagKind::Definition, "b.py")],
        ),
    );

    let (graph, _) = DependencyGraph::build(&imports, &tags, 100);
    let weight = graph
        .edge_weight(Path::new("a.py"), Path::new("b.py"))
        .expect("edge present");
    assert!(weight > 1.0, "well-named shared symbol should boost weight, got {weight}");
}
