//! Analysis Facade (C10): the single external entry point, owning
//! configuration, caches, and the memoized dependency graph.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Instant;

use chrono::DateTime;
use chrono::Utc;

use crate::cache::TagCache;
use crate::centrality::CentralityEngine;
use crate::config::Config;
use crate::discovery::FileDiscovery;
use crate::error::Diagnostic;
use crate::error::DiagnosticKind;
use crate::error::RepoMapError;
use crate::error::Result;
use crate::graph::DependencyGraph;
use crate::imports::ImportAnalyzer;
use crate::impact::ImpactAnalyzer;
use crate::matchers::IdentifierMatchers;
use crate::orchestrator::CancellationToken;
use crate::orchestrator::ParallelOrchestrator;
use crate::terms::classify_identifier_kind;
use crate::types::CentralityVector;
use crate::types::FileImports;
use crate::types::FileTags;
use crate::types::ImpactReport;
use crate::types::ProjectInfo;
use crate::types::SearchRequest;
use crate::types::SearchResponse;
use crate::types::TagKind;

/// Cumulative, cross-call performance and diagnostic counters (§4.10
/// supplemental: the "performance metrics" surface the facade publishes,
/// independent of any single `analyze_project` call's return value).
#[derive(Debug, Clone, Default)]
pub struct FacadeStats {
    pub diagnostics_by_kind: HashMap<DiagnosticKind, usize>,
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub last_run_ms: u64,
}

struct FacadeState {
    file_tags: HashMap<PathBuf, FileTags>,
    file_imports: HashMap<PathBuf, FileImports>,
    graph: Option<Arc<DependencyGraph>>,
    centrality: Option<CentralityVector>,
    stats: FacadeStats,
    last_updated: Option<DateTime<Utc>>,
}

impl Default for FacadeState {
    fn default() -> Self {
        Self {
            file_tags: HashMap::new(),
            file_imports: HashMap::new(),
            graph: None,
            centrality: None,
            stats: FacadeStats::default(),
            last_updated: None,
        }
    }
}

/// Binds C1 through C9 behind one object owning configuration, the tag
/// cache, the worker pool, the matcher caches, and the memoized graph.
pub struct Facade {
    config: Config,
    discovery: FileDiscovery,
    import_analyzer: ImportAnalyzer,
    cache: TagCache,
    orchestrator: ParallelOrchestrator,
    matchers: IdentifierMatchers,
    state: Mutex<FacadeState>,
}

impl Facade {
    /// Validates `config` (§7 `ConfigError`), resolves and creates
    /// `cache_dir` if absent, and leaves everything else lazy: no file is
    /// touched until the first analysis call (§5 Lifecycle).
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        std::fs::create_dir_all(config.cache_dir()).map_err(|e| RepoMapError::IoError {
            path: config.cache_dir(),
            cause: e.to_string(),
        })?;

        let cache = TagCache::open(&config.cache_dir(), &config.project_root)?;
        let discovery = FileDiscovery::new();
        let import_analyzer = ImportAnalyzer::new(config.project_root.clone());
        let orchestrator = ParallelOrchestrator::new(
            config.perf.max_workers,
            config.perf.parallel_threshold,
            config.perf.allow_fallback,
        );
        let matchers = IdentifierMatchers::from_config(&config);

        Ok(Self {
            config,
            discovery,
            import_analyzer,
            cache,
            orchestrator,
            matchers,
            state: Mutex::new(FacadeState::default()),
        })
    }

    /// Runs C1 → C4 and summarizes the resulting identifier universe.
    pub fn analyze_project(&self) -> Result<ProjectInfo> {
        let started = Instant::now();
        let relative_paths = self.discovery.discover(&self.config.project_root)?;
        let absolute_paths: Vec<PathBuf> = relative_paths
            .iter()
            .map(|p| self.config.project_root.join(p))
            .collect();

        let outcome = self.orchestrator.run(
            &absolute_paths,
            &self.cache,
            &CancellationToken::new(),
            |_event| {},
        )?;

        let run_cache_hits = outcome.cache_hits;
        let run_cache_misses = outcome.cache_misses;
        let file_tags = relativize_file_tags(outcome.file_tags, &self.config.project_root);

        let mut file_types: HashMap<String, usize> = HashMap::new();
        let mut identifier_kinds: HashMap<crate::types::IdentifierKind, usize> = HashMap::new();
        let mut identifier_count = 0usize;
        for (path, tags) in &file_tags {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string();
            *file_types.entry(ext).or_insert(0) += 1;

            for tag in &tags.tags {
                if tag.kind != TagKind::Definition {
                    continue;
                }
                identifier_count += 1;
                *identifier_kinds.entry(classify_identifier_kind(&tag.name)).or_insert(0) += 1;
            }
        }

        let file_count = file_tags.len();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let last_updated = Utc::now();

        let mut state = self.state.lock().expect("facade state lock poisoned");
        record_diagnostics(&mut state.stats, &outcome.diagnostics);
        state.stats.last_run_ms = elapsed_ms;
        state.stats.cache_hits += run_cache_hits;
        state.stats.cache_misses += run_cache_misses;
        state.file_tags = file_tags;
        state.graph = None;
        state.centrality = None;
        state.last_updated = Some(last_updated);
        self.matchers.invalidate();
        drop(state);

        // Persist whatever C4 wrote through C3 this run. A write failure is
        // cache corruption territory (§7 CacheError): warn and keep going
        // with the in-memory cache rather than failing the whole analysis.
        if let Err(e) = self.cache.persist() {
            tracing::warn!(error = %e, "failed to persist tag cache");
        }

        Ok(ProjectInfo {
            file_count,
            identifier_count,
            file_types,
            identifier_kinds,
            elapsed_ms,
            last_updated,
        })
    }

    /// Runs C5 against the latest identifier universe, triggering
    /// `analyze_project` first if no tags have been extracted yet.
    pub fn search_identifiers(&self, request: SearchRequest) -> Result<SearchResponse> {
        {
            let state = self.state.lock().expect("facade state lock poisoned");
            if state.file_tags.is_empty() {
                drop(state);
                self.analyze_project()?;
            }
        }

        let state = self.state.lock().expect("facade state lock poisoned");
        let mut locations: HashMap<&str, (PathBuf, u32)> = HashMap::new();
        let mut universe: BTreeSet<&str> = BTreeSet::new();
        for tags in state.file_tags.values() {
            for tag in &tags.tags {
                universe.insert(tag.name.as_str());
                locations
                    .entry(tag.name.as_str())
                    .and_modify(|existing| {
                        if tag.kind == TagKind::Definition {
                            *existing = (tag.path.clone(), tag.line);
                        }
                    })
                    .or_insert_with(|| (tag.path.clone(), tag.line));
            }
        }
        let universe_vec: Vec<String> = universe.iter().map(|s| s.to_string()).collect();

        let mut response = self.matchers.search(request, &universe_vec, &self.config);
        for result in &mut response.results {
            if let Some((path, line)) = locations.get(result.identifier.as_str()) {
                result.path = Some(path.clone());
                result.line = Some(*line);
            }
        }
        Ok(response)
    }

    /// Runs C1 → C6 → C7, or returns the memoized graph from the last run.
    pub fn build_dependency_graph(&self) -> Result<Arc<DependencyGraph>> {
        {
            let state = self.state.lock().expect("facade state lock poisoned");
            if let Some(graph) = &state.graph {
                return Ok(Arc::clone(graph));
            }
        }

        if self.state.lock().expect("facade state lock poisoned").file_tags.is_empty() {
            self.analyze_project()?;
        }

        let relative_paths: Vec<PathBuf> = self
            .state
            .lock()
            .expect("facade state lock poisoned")
            .file_tags
            .keys()
            .cloned()
            .collect();
        let (file_imports, import_diagnostics) = self.import_analyzer.analyze_project(&relative_paths);

        let mut state = self.state.lock().expect("facade state lock poisoned");
        record_diagnostics(&mut state.stats, &import_diagnostics);
        state.file_imports = file_imports;

        let (graph, graph_diagnostics) = DependencyGraph::build(
            &state.file_imports,
            &state.file_tags,
            self.config.deps.max_graph_size,
        );
        record_diagnostics(&mut state.stats, &graph_diagnostics);

        let graph = Arc::new(graph);
        state.graph = Some(Arc::clone(&graph));
        state.centrality = None;
        Ok(graph)
    }

    /// Ensures the graph exists and runs C8, memoizing the result until the
    /// next `refresh()` or graph rebuild.
    pub fn centrality_scores(&self) -> Result<CentralityVector> {
        {
            let state = self.state.lock().expect("facade state lock poisoned");
            if let Some(vector) = &state.centrality {
                return Ok(vector.clone());
            }
        }

        let graph = self.build_dependency_graph()?;
        let engine = CentralityEngine::new(&graph, self.config.deps.centrality_algorithms.clone());
        let vector = engine.scores().clone();

        let mut state = self.state.lock().expect("facade state lock poisoned");
        state.centrality = Some(vector.clone());
        Ok(vector)
    }

    /// Ensures the graph and centrality scores exist and runs C9.
    ///
    /// A changed file absent from the graph contributes nothing to the
    /// report but is recorded as a `NotFound` diagnostic (§4.9: "analyzing a
    /// non-existent file yields an empty ImpactReport with a diagnostic").
    pub fn impact_of(&self, changed_files: &BTreeSet<PathBuf>) -> Result<ImpactReport> {
        let graph = self.build_dependency_graph()?;
        let centrality = self.centrality_scores()?;

        let missing: Vec<Diagnostic> = changed_files
            .iter()
            .filter(|p| !graph.contains(p))
            .map(|p| Diagnostic::new(p.clone(), DiagnosticKind::NotFound, "file not found in dependency graph"))
            .collect();
        if !missing.is_empty() {
            let mut state = self.state.lock().expect("facade state lock poisoned");
            record_diagnostics(&mut state.stats, &missing);
        }

        let analyzer = ImpactAnalyzer::new(&graph, &centrality.composite);
        Ok(analyzer.analyze(changed_files))
    }

    /// Ensures the graph exists and returns its simple cycles.
    pub fn find_cycles(&self) -> Result<Vec<Vec<PathBuf>>> {
        let graph = self.build_dependency_graph()?;
        Ok(graph.find_cycles().to_vec())
    }

    /// Invalidates tag cache entries whose mtime/size changed and drops the
    /// memoized graph, matcher caches, and centrality caches (§4.10).
    pub fn refresh(&self) -> Result<()> {
        let relative_paths = self.discovery.discover(&self.config.project_root)?;
        let absolute_paths: Vec<PathBuf> = relative_paths
            .iter()
            .map(|p| self.config.project_root.join(p))
            .collect();
        self.cache.invalidate_stale(&absolute_paths);
        self.matchers.invalidate();

        let mut state = self.state.lock().expect("facade state lock poisoned");
        state.graph = None;
        state.centrality = None;
        state.file_tags.clear();
        state.file_imports.clear();
        Ok(())
    }

    /// Cumulative diagnostics, cache counters, and last-run timing,
    /// independent of any single call's return value (§4.10 supplemental).
    pub fn stats(&self) -> FacadeStats {
        self.state.lock().expect("facade state lock poisoned").stats.clone()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.state.lock().expect("facade state lock poisoned").last_updated
    }
}

fn record_diagnostics(stats: &mut FacadeStats, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        *stats.diagnostics_by_kind.entry(diagnostic.kind).or_insert(0) += 1;
    }
}

/// Rewrites an orchestrator outcome keyed by absolute path (required by
/// [`crate::tags::extractor::TagExtractor`], which reads the filesystem at
/// the path it is given) back to project-relative paths, matching the
/// convention [`FileImports`] and [`DependencyGraph`] use throughout.
fn relativize_file_tags(
    file_tags: HashMap<PathBuf, FileTags>,
    project_root: &Path,
) -> HashMap<PathBuf, FileTags> {
    file_tags
        .into_iter()
        .map(|(absolute, mut tags)| {
            let relative = absolute.strip_prefix(project_root).unwrap_or(&absolute).to_path_buf();
            tags.path = relative.clone();
            for tag in &mut tags.tags {
                tag.path = relative.clone();
            }
            (relative, tags)
        })
        .collect()
}

#[cfg(test)]
#[path = "facade.test.rs"]
mod tests;
