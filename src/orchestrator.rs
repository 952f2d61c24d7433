//! Parallel Orchestrator (C4): fans tag extraction (C2) out across a worker
//! pool, consulting the tag cache (C3) per file, aggregating diagnostics
//! rather than aborting on a single bad file.

use std::path::Path;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::collections::HashMap;

use crate::cache::TagCache;
use crate::error::Diagnostic;
use crate::error::DiagnosticKind;
use crate::error::RepoMapError;
use crate::error::Result;
use crate::tags::extractor::TagExtractor;
use crate::types::FileTags;

/// A progress event emitted between files (§4.4). Must be callable from any
/// worker without external locking — callers supplying a sink that needs
/// shared state are expected to wrap it in their own `Arc<Mutex<_>>` or use
/// atomics internally, as this crate's own `enable_progress` plumbing does.
pub struct ProgressEvent {
    pub files_done: usize,
    pub files_total: usize,
    pub last_completed_path: PathBuf,
}

/// Polled between files; in-flight extractions are always allowed to
/// complete (§4.4: "no partial FileTags is emitted").
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Aggregate result of an orchestrator run.
pub struct OrchestratorOutcome {
    pub file_tags: HashMap<PathBuf, FileTags>,
    pub diagnostics: Vec<Diagnostic>,
    pub cancelled: bool,
    /// Whether a pool failure forced a fallback to sequential processing.
    pub degraded_to_sequential: bool,
    /// Number of files served from C3 without re-extraction this run.
    pub cache_hits: usize,
    /// Number of files extracted via C2 (cache miss) this run.
    pub cache_misses: usize,
}

/// Drives tag extraction across files per the scheduling contract in §4.4.
pub struct ParallelOrchestrator {
    max_workers: usize,
    parallel_threshold: usize,
    allow_fallback: bool,
}

impl ParallelOrchestrator {
    pub fn new(max_workers: usize, parallel_threshold: usize, allow_fallback: bool) -> Self {
        Self {
            max_workers: max_workers.clamp(1, 16),
            parallel_threshold,
            allow_fallback,
        }
    }

    /// Extracts tags for every file in `paths`, consulting `cache` per file
    /// and writing back on a miss.
    ///
    /// `progress` is invoked after every file completes (cache hit or miss
    /// alike). `cancellation` is polled between files; a cancellation mid-run
    /// returns whatever files completed before the poll, with `cancelled`
    /// set on the outcome.
    pub fn run(
        &self,
        paths: &[PathBuf],
        cache: &TagCache,
        cancellation: &CancellationToken,
        progress: impl Fn(ProgressEvent) + Sync,
    ) -> Result<OrchestratorOutcome> {
        if paths.len() < self.parallel_threshold {
            return Ok(self.run_sequential(paths, cache, cancellation, &progress, false));
        }

        match self.run_parallel(paths, cache, cancellation, &progress) {
            Ok(outcome) => Ok(outcome),
            Err(cause) if self.allow_fallback => {
                tracing::warn!(%cause, "parallel pool failed, degrading to sequential processing");
                Ok(self.run_sequential(paths, cache, cancellation, &progress, true))
            }
            Err(cause) => Err(RepoMapError::ParallelError { cause }),
        }
    }

    fn run_sequential(
        &self,
        paths: &[PathBuf],
        cache: &TagCache,
        cancellation: &CancellationToken,
        progress: &impl Fn(ProgressEvent),
        degraded: bool,
    ) -> OrchestratorOutcome {
        let mut extractor = TagExtractor::new();
        let mut file_tags = HashMap::new();
        let mut diagnostics = Vec::new();
        let mut cache_hits = 0;
        let mut cache_misses = 0;
        let total = paths.len();

        for (i, path) in paths.iter().enumerate() {
            if cancellation.is_cancelled() {
                return OrchestratorOutcome {
                    file_tags,
                    diagnostics,
                    cancelled: true,
                    degraded_to_sequential: degraded,
                    cache_hits,
                    cache_misses,
                };
            }
            extract_one(path, cache, &mut extractor, &mut file_tags, &mut diagnostics, &mut cache_hits, &mut cache_misses);
            progress(ProgressEvent {
                files_done: i + 1,
                files_total: total,
                last_completed_path: path.clone(),
            });
        }

        OrchestratorOutcome {
            file_tags,
            diagnostics,
            cancelled: false,
            degraded_to_sequential: degraded,
            cache_hits,
            cache_misses,
        }
    }

    /// Runs with a pool of `min(max_workers, N)` rayon threads. Each worker
    /// owns its own `TagExtractor` (tree-sitter contexts are not `Sync`).
    fn run_parallel(
        &self,
        paths: &[PathBuf],
        cache: &TagCache,
        cancellation: &CancellationToken,
        progress: &(impl Fn(ProgressEvent) + Sync),
    ) -> std::result::Result<OrchestratorOutcome, String> {
        let worker_count = self.max_workers.min(paths.len()).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .build()
            .map_err(|e| format!("failed to build worker pool: {e}"))?;

        let total = paths.len();
        let files_done = AtomicUsize::new(0);
        let cache_hits = AtomicUsize::new(0);
        let cache_misses = AtomicUsize::new(0);

        let results: Vec<(PathBuf, std::result::Result<FileTags, Diagnostic>)> = pool.install(|| {
            use rayon::prelude::*;
            paths
                .par_iter()
                .map_init(TagExtractor::new, |extractor, path| {
                    if cancellation.is_cancelled() {
                        return None;
                    }
                    let (outcome, was_hit) = extract_one_result(path, cache, extractor);
                    if was_hit {
                        cache_hits.fetch_add(1, Ordering::SeqCst);
                    } else {
                        cache_misses.fetch_add(1, Ordering::SeqCst);
                    }
                    let done = files_done.fetch_add(1, Ordering::SeqCst) + 1;
                    progress(ProgressEvent {
                        files_done: done,
                        files_total: total,
                        last_completed_path: path.clone(),
                    });
                    Some((path.clone(), outcome))
                })
                .flatten()
                .collect()
        });

        let mut file_tags = HashMap::new();
        let mut diagnostics = Vec::new();
        for (path, outcome) in results {
            match outcome {
                Ok(tags) => {
                    file_tags.insert(path, tags);
                }
                Err(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        Ok(OrchestratorOutcome {
            file_tags,
            diagnostics,
            cancelled: cancellation.is_cancelled(),
            degraded_to_sequential: false,
            cache_hits: cache_hits.load(Ordering::SeqCst),
            cache_misses: cache_misses.load(Ordering::SeqCst),
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn extract_one(
    path: &Path,
    cache: &TagCache,
    extractor: &mut TagExtractor,
    file_tags: &mut HashMap<PathBuf, FileTags>,
    diagnostics: &mut Vec<Diagnostic>,
    cache_hits: &mut usize,
    cache_misses: &mut usize,
) {
    let (outcome, was_hit) = extract_one_result(path, cache, extractor);
    if was_hit {
        *cache_hits += 1;
    } else {
        *cache_misses += 1;
    }
    match outcome {
        Ok(tags) => {
            file_tags.insert(path.to_path_buf(), tags);
        }
        Err(diagnostic) => diagnostics.push(diagnostic),
    }
}

/// Extracts tags for `path`, consulting `cache` first. The returned `bool` is
/// `true` on a C3 hit and `false` on a miss (§4.10 supplemental: the facade's
/// cache hit/miss counters).
fn extract_one_result(
    path: &Path,
    cache: &TagCache,
    extractor: &mut TagExtractor,
) -> (std::result::Result<FileTags, Diagnostic>, bool) {
    if let Some(cached) = cache.get(path) {
        return (Ok(cached), true);
    }
    let result = match extractor.extract_file(path) {
        Ok(tags) => {
            cache.put(tags.clone());
            Ok(tags)
        }
        Err(e) => Err(Diagnostic::new(path.to_path_buf(), DiagnosticKind::Parse, e.to_string())),
    };
    (result, false)
}

#[cfg(test)]
#[path = "orchestrator.test.rs"]
mod tests;
