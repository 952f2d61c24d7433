use super::*;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn small_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(
        &temp.path().join("main.py"),
        "from .util import calculate_user_score\n\n\ndef run():\n    calculate_user_score()\n",
    );
    write(
        &temp.path().join("util.py"),
        "def calculate_user_score():\n    return 1\n",
    );
    temp
}

#[test]
fn analyze_project_counts_files_and_identifiers() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();
    let info = facade.analyze_project().unwrap();

    assert_eq!(info.file_count, 2);
    assert!(info.identifier_count >= 2);
    assert_eq!(info.file_types.get("py"), Some(&2));
}

#[test]
fn search_identifiers_finds_defined_function() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();

    let response = facade
        .search_identifiers(SearchRequest {
            query: "calculate_user_score".to_string(),
            kind: crate::types::MatchKind::Fuzzy,
            threshold: 0.5,
            max_results: 10,
        })
        .unwrap();

    assert!(response.results.iter().any(|r| r.identifier == "calculate_user_score"));
}

#[test]
fn build_dependency_graph_links_import_to_target() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();

    let graph = facade.build_dependency_graph().unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(
        graph.dependencies(Path::new("main.py")),
        BTreeSet::from([PathBuf::from("util.py")])
    );
}

#[test]
fn build_dependency_graph_is_memoized() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();

    let first = facade.build_dependency_graph().unwrap();
    let second = facade.build_dependency_graph().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn centrality_scores_report_contributing_algorithms() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();

    let scores = facade.centrality_scores().unwrap();
    assert!(!scores.contributing_algorithms.is_empty());
}

#[test]
fn impact_of_reports_direct_dependent_on_utility_change() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();

    let changed = BTreeSet::from([PathBuf::from("util.py")]);
    let report = facade.impact_of(&changed).unwrap();
    assert_eq!(report.direct_dependents, BTreeSet::from([PathBuf::from("main.py")]));
}

#[test]
fn find_cycles_is_empty_for_acyclic_project() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();
    assert!(facade.find_cycles().unwrap().is_empty());
}

#[test]
fn refresh_drops_memoized_graph() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();
    let _ = facade.build_dependency_graph().unwrap();

    facade.refresh().unwrap();
    let state = facade.state.lock().unwrap();
    assert!(state.graph.is_none());
    assert!(state.file_tags.is_empty());
}

#[test]
fn stats_accumulate_across_calls() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();
    facade.analyze_project().unwrap();
    let stats = facade.stats();
    assert!(stats.last_run_ms < 60_000);
}

#[test]
fn stats_track_cache_hits_and_misses_across_runs() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();

    facade.analyze_project().unwrap();
    let after_first = facade.stats();
    assert_eq!(after_first.cache_misses, 2);
    assert_eq!(after_first.cache_hits, 0);

    facade.analyze_project().unwrap();
    let after_second = facade.stats();
    assert_eq!(after_second.cache_hits, 2);
    assert_eq!(after_second.cache_misses, 2);
}

#[test]
fn impact_of_nonexistent_file_reports_diagnostic() {
    let temp = small_project();
    let facade = Facade::new(Config::new(temp.path())).unwrap();

    let changed = BTreeSet::from([PathBuf::from("does_not_exist.py")]);
    let report = facade.impact_of(&changed).unwrap();

    assert!(report.direct_dependents.is_empty());
    assert!(report.transitive_dependents.is_empty());
    assert_eq!(
        facade.stats().diagnostics_by_kind.get(&DiagnosticKind::NotFound),
        Some(&1)
    );
}

#[test]
fn new_rejects_invalid_configuration() {
    let mut config = Config::new("/tmp/does-not-matter");
    config.perf.max_workers = 0;
    assert!(Facade::new(config).is_err());
}
