//! Tag cache (C3): an in-memory map backed by a per-project persistent store.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

use crate::error::RepoMapError;
use crate::error::Result;
use crate::types::FileTags;

/// Bumped when the persisted payload shape changes incompatibly. A reader
/// seeing a newer major version treats the store as cold rather than erroring.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedCache {
    schema_version: u32,
    #[serde(default)]
    entries: HashMap<PathBuf, FileTags>,
}

/// The project-relative-path-keyed tag cache. Strongly consistent within a
/// process; safe to share across C4 worker threads.
pub struct TagCache {
    store_path: PathBuf,
    entries: RwLock<HashMap<PathBuf, FileTags>>,
}

impl TagCache {
    /// Opens (or cold-starts) the cache for `project_root`, rooted under
    /// `cache_dir`. The project gets its own subdirectory named by the
    /// SHA-256 of its canonicalized path, so unrelated projects sharing a
    /// `cache_dir` never collide.
    pub fn open(cache_dir: &Path, project_root: &Path) -> Result<Self> {
        let canonical = project_root
            .canonicalize()
            .unwrap_or_else(|_| project_root.to_path_buf());
        let mut hasher = Sha256::new();
        hasher.update(canonical.to_string_lossy().as_bytes());
        let digest = hex::encode(hasher.finalize());

        let project_dir = cache_dir.join(digest);
        std::fs::create_dir_all(&project_dir).map_err(|e| RepoMapError::CacheError {
            cause: format!("failed to create cache dir {}: {e}", project_dir.display()),
        })?;
        let store_path = project_dir.join("tags.json");

        let entries = match std::fs::read(&store_path) {
            Ok(bytes) => match serde_json::from_slice::<PersistedCache>(&bytes) {
                Ok(persisted) if persisted.schema_version == SCHEMA_VERSION => persisted.entries,
                Ok(persisted) => {
                    tracing::warn!(
                        found = persisted.schema_version,
                        expected = SCHEMA_VERSION,
                        "tag cache schema version mismatch, starting cold"
                    );
                    HashMap::new()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "tag cache store is corrupt, starting cold");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            store_path,
            entries: RwLock::new(entries),
        })
    }

    /// An in-memory-only cache with no persistent backing, for tests and
    /// one-shot analyses.
    pub fn in_memory() -> Self {
        Self {
            store_path: PathBuf::new(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached tags for `path` if present and still fresh
    /// (current mtime/size match the stored entry's).
    pub fn get(&self, path: &Path) -> Option<FileTags> {
        let entries = self.entries.read().expect("tag cache lock poisoned");
        let cached = entries.get(path)?;

        let metadata = std::fs::metadata(path).ok()?;
        let mtime_secs = mtime_secs(&metadata);
        if cached.mtime_secs != mtime_secs || cached.size_bytes != metadata.len() {
            return None;
        }
        Some(cached.clone())
    }

    /// Atomically replaces the entry for `file_tags.path`.
    pub fn put(&self, file_tags: FileTags) {
        let mut entries = self.entries.write().expect("tag cache lock poisoned");
        entries.insert(file_tags.path.clone(), file_tags);
    }

    /// Removes a single entry, if present.
    pub fn invalidate(&self, path: &Path) {
        let mut entries = self.entries.write().expect("tag cache lock poisoned");
        entries.remove(path);
    }

    /// Removes every tracked entry among `paths` whose on-disk mtime/size no
    /// longer matches what is cached. Returns the number removed.
    pub fn invalidate_stale(&self, paths: &[PathBuf]) -> usize {
        let mut entries = self.entries.write().expect("tag cache lock poisoned");
        let mut removed = 0;
        for path in paths {
            let Some(cached) = entries.get(path) else {
                continue;
            };
            let stale = match std::fs::metadata(path) {
                Ok(metadata) => {
                    cached.mtime_secs != mtime_secs(&metadata) || cached.size_bytes != metadata.len()
                }
                Err(_) => true,
            };
            if stale {
                entries.remove(path);
                removed += 1;
            }
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("tag cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the current in-memory state to the persistent store via a
    /// temp-file-then-rename so a crash mid-write never leaves a corrupt
    /// entry observable to a reader.
    pub fn persist(&self) -> Result<()> {
        if self.store_path.as_os_str().is_empty() {
            return Ok(());
        }
        let entries = self.entries.read().expect("tag cache lock poisoned").clone();
        let payload = PersistedCache {
            schema_version: SCHEMA_VERSION,
            entries,
        };
        let bytes = serde_json::to_vec(&payload).map_err(|e| RepoMapError::CacheError {
            cause: format!("failed to serialize tag cache: {e}"),
        })?;

        let dir = self
            .store_path
            .parent()
            .unwrap_or_else(|| Path::new("."));
        let mut tmp_path = self.store_path.clone();
        tmp_path.set_extension("json.tmp");

        std::fs::write(&tmp_path, &bytes).map_err(|e| RepoMapError::CacheError {
            cause: format!("failed to write {}: {e}", tmp_path.display()),
        })?;
        std::fs::rename(&tmp_path, &self.store_path).map_err(|e| RepoMapError::CacheError {
            cause: format!("failed to persist cache into {}: {e}", dir.display()),
        })?;
        Ok(())
    }
}

fn mtime_secs(metadata: &std::fs::Metadata) -> i64 {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
#[path = "cache.test.rs"]
mod tests;
