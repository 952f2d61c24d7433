use super::*;
use tempfile::TempDir;

fn sample_tags(path: &Path, mtime_secs: i64, size_bytes: u64) -> FileTags {
    FileTags {
        path: path.to_path_buf(),
        tags: Vec::new(),
        mtime_secs,
        size_bytes,
    }
}

#[test]
fn get_misses_when_absent() {
    let cache = TagCache::in_memory();
    assert!(cache.get(Path::new("missing.py")).is_none());
}

#[test]
fn put_then_get_returns_fresh_entry() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("main.py");
    std::fs::write(&path, "x = 1\n").expect("write fixture");
    let metadata = std::fs::metadata(&path).expect("stat fixture");

    let cache = TagCache::in_memory();
    cache.put(sample_tags(&path, mtime_secs(&metadata), metadata.len()));

    assert!(cache.get(&path).is_some());
}

#[test]
fn get_misses_when_file_changed_since_caching() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("main.py");
    std::fs::write(&path, "x = 1\n").expect("write fixture");

    let cache = TagCache::in_memory();
    cache.put(sample_tags(&path, 0, 0));

    assert!(cache.get(&path).is_none());
}

#[test]
fn invalidate_removes_entry() {
    let path = PathBuf::from("main.py");
    let cache = TagCache::in_memory();
    cache.put(sample_tags(&path, 0, 0));
    assert_eq!(cache.len(), 1);

    cache.invalidate(&path);
    assert_eq!(cache.len(), 0);
}

#[test]
fn invalidate_stale_counts_only_changed_entries() {
    let temp = TempDir::new().expect("temp dir");
    let fresh_path = temp.path().join("fresh.py");
    let stale_path = temp.path().join("stale.py");
    std::fs::write(&fresh_path, "a = 1\n").expect("write fixture");
    std::fs::write(&stale_path, "b = 2\n").expect("write fixture");

    let fresh_metadata = std::fs::metadata(&fresh_path).expect("stat fixture");
    let cache = TagCache::in_memory();
    cache.put(sample_tags(&fresh_path, mtime_secs(&fresh_metadata), fresh_metadata.len()));
    cache.put(sample_tags(&stale_path, 0, 0));

    let removed = cache.invalidate_stale(&[fresh_path, stale_path]);
    assert_eq!(removed, 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn open_creates_project_specific_subdirectory() {
    let cache_root = TempDir::new().expect("cache root");
    let project_root = TempDir::new().expect("project root");

    let cache = TagCache::open(cache_root.path(), project_root.path()).expect("open cache");
    assert!(cache.is_empty());

    let mut entries = std::fs::read_dir(cache_root.path()).expect("read cache root");
    assert!(entries.next().is_some());
}

#[test]
fn persist_then_reopen_recovers_entries() {
    let cache_root = TempDir::new().expect("cache root");
    let project_root = TempDir::new().expect("project root");
    let path = project_root.path().join("main.py");
    std::fs::write(&path, "x = 1\n").expect("write fixture");
    let metadata = std::fs::metadata(&path).expect("stat fixture");

    let cache = TagCache::open(cache_root.path(), project_root.path()).expect("open cache");
    cache.put(sample_tags(&path, mtime_secs(&metadata), metadata.len()));
    cache.persist().expect("persist cache");

    let reopened = TagCache::open(cache_root.path(), project_root.path()).expect("reopen cache");
    assert_eq!(reopened.len(), 1);
    assert!(reopened.get(&path).is_some());
}
