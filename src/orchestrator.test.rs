use super::*;
use std::sync::Mutex;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn no_progress(_event: ProgressEvent) {}

#[test]
fn sequential_path_extracts_every_file() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.py");
    let b = temp.path().join("b.py");
    write(&a, "def foo():\n    pass\n");
    write(&b, "def bar():\n    pass\n");

    let cache = TagCache::in_memory();
    let orchestrator = ParallelOrchestrator::new(4, 10, false);
    let outcome = orchestrator
        .run(&[a.clone(), b.clone()], &cache, &CancellationToken::new(), no_progress)
        .unwrap();

    assert_eq!(outcome.file_tags.len(), 2);
    assert!(outcome.diagnostics.is_empty());
    assert!(!outcome.cancelled);
}

#[test]
fn parallel_path_extracts_every_file_above_threshold() {
    let temp = TempDir::new().unwrap();
    let paths: Vec<PathBuf> = (0..5)
        .map(|i| {
            let path = temp.path().join(format!("f{i}.py"));
            write(&path, &format!("def fn_{i}():\n    pass\n"));
            path
        })
        .collect();

    let cache = TagCache::in_memory();
    let orchestrator = ParallelOrchestrator::new(4, 2, false);
    let outcome = orchestrator
        .run(&paths, &cache, &CancellationToken::new(), no_progress)
        .unwrap();

    assert_eq!(outcome.file_tags.len(), 5);
}

#[test]
fn missing_file_is_a_diagnostic_not_a_failure() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.py");

    let cache = TagCache::in_memory();
    let orchestrator = ParallelOrchestrator::new(4, 10, false);
    let outcome = orchestrator
        .run(&[missing], &cache, &CancellationToken::new(), no_progress)
        .unwrap();

    assert!(outcome.file_tags.is_empty());
    assert_eq!(outcome.diagnostics.len(), 1);
}

#[test]
fn cache_hit_avoids_reextraction_and_outcome_still_populated() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.py");
    write(&a, "def foo():\n    pass\n");

    let cache = TagCache::in_memory();
    let orchestrator = ParallelOrchestrator::new(4, 10, false);
    let first = orchestrator
        .run(&[a.clone()], &cache, &CancellationToken::new(), no_progress)
        .unwrap();
    assert_eq!(first.file_tags.len(), 1);

    let second = orchestrator
        .run(&[a.clone()], &cache, &CancellationToken::new(), no_progress)
        .unwrap();
    assert_eq!(second.file_tags.len(), 1);
    assert_eq!(second.file_tags[&a], first.file_tags[&a]);
}

#[test]
fn cancellation_stops_sequential_run_early() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.py");
    let b = temp.path().join("b.py");
    write(&a, "def foo():\n    pass\n");
    write(&b, "def bar():\n    pass\n");

    let cache = TagCache::in_memory();
    let token = CancellationToken::new();
    token.cancel();
    let orchestrator = ParallelOrchestrator::new(4, 10, false);
    let outcome = orchestrator.run(&[a, b], &cache, &token, no_progress).unwrap();

    assert!(outcome.cancelled);
    assert!(outcome.file_tags.is_empty());
}

#[test]
fn progress_sink_is_invoked_once_per_file() {
    let temp = TempDir::new().unwrap();
    let a = temp.path().join("a.py");
    let b = temp.path().join("b.py");
    write(&a, "def foo():\n    pass\n");
    write(&b, "def bar():\n    pass\n");

    let calls: Mutex<Vec<usize>> = Mutex::new(Vec::new());
    let cache = TagCache::in_memory();
    let orchestrator = ParallelOrchestrator::new(4, 10, false);
    orchestrator
        .run(&[a, b], &cache, &CancellationToken::new(), |event| {
            calls.lock().unwrap().push(event.files_done);
        })
        .unwrap();

    let recorded = calls.into_inner().unwrap();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded.last(), Some(&2));
}

#[test]
fn worker_count_is_clamped_to_sixteen() {
    let orchestrator = ParallelOrchestrator::new(64, 10, false);
    assert_eq!(orchestrator.max_workers, 16);
}
