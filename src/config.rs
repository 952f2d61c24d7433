//! Configuration for the repomap core (§6).
//!
//! Loaded from an optional TOML file; every section has defaults, so an
//! empty configuration is valid except for `project_root`.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::Result;
use crate::error::RepoMapError;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project_root: PathBuf,
    #[serde(default)]
    pub root: RootConfig,
    #[serde(default)]
    pub perf: PerfConfig,
    #[serde(default)]
    pub fuzzy: FuzzyConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
    #[serde(default)]
    pub deps: DepsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub cache_dir: Option<PathBuf>,
    pub map_tokens: u32,
    pub max_results: usize,
    pub refresh_cache: bool,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            map_tokens: 4096,
            max_results: 50,
            refresh_cache: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerfConfig {
    pub max_workers: usize,
    pub parallel_threshold: usize,
    pub enable_progress: bool,
    pub cache_size: usize,
    pub cache_ttl_secs: u64,
    pub allow_fallback: bool,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            parallel_threshold: 10,
            enable_progress: true,
            cache_size: 1000,
            cache_ttl_secs: 3600,
            allow_fallback: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuzzyStrategy {
    Exact,
    Prefix,
    Suffix,
    Substring,
    Levenshtein,
    Word,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// 0-100 percentage, per §6; converted to a [0,1] fraction internally.
    pub threshold: u8,
    pub strategies: HashSet<FuzzyStrategy>,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            threshold: 70,
            strategies: HashSet::from([
                FuzzyStrategy::Prefix,
                FuzzyStrategy::Substring,
                FuzzyStrategy::Levenshtein,
            ]),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SemanticConfig {
    pub enabled: bool,
    pub threshold: f64,
    pub min_word_length: usize,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 0.1,
            min_word_length: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CentralityAlgorithm {
    Degree,
    Betweenness,
    Pagerank,
    Eigenvector,
    Closeness,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DepsConfig {
    pub max_graph_size: usize,
    pub performance_threshold_seconds: f64,
    pub centrality_algorithms: HashSet<CentralityAlgorithm>,
}

impl Default for DepsConfig {
    fn default() -> Self {
        Self {
            max_graph_size: 10_000,
            performance_threshold_seconds: 30.0,
            centrality_algorithms: HashSet::from([
                CentralityAlgorithm::Degree,
                CentralityAlgorithm::Betweenness,
                CentralityAlgorithm::Pagerank,
            ]),
        }
    }
}

impl Config {
    /// Minimal configuration with only the required `project_root` set.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            root: RootConfig::default(),
            perf: PerfConfig::default(),
            fuzzy: FuzzyConfig::default(),
            semantic: SemanticConfig::default(),
            deps: DepsConfig::default(),
        }
    }

    /// Load configuration from a TOML file. Falls back to a default-populated
    /// config rooted at `fallback_root` on a missing or invalid file, logging
    /// a warning rather than failing (§6 supplemental).
    pub fn load(path: &Path, fallback_root: &Path) -> Self {
        if !path.exists() {
            return Self::new(fallback_root);
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    Self::new(fallback_root)
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                Self::new(fallback_root)
            }
        }
    }

    /// Resolved cache directory: `<project_root>/.repomap/cache` unless overridden.
    pub fn cache_dir(&self) -> PathBuf {
        self.root
            .cache_dir
            .clone()
            .unwrap_or_else(|| self.project_root.join(".repomap").join("cache"))
    }

    /// Validates the numeric ranges named in §6. Called by `Facade::new`.
    pub fn validate(&self) -> Result<()> {
        if self.project_root.as_os_str().is_empty() {
            return Err(RepoMapError::ConfigError {
                message: "project_root must not be empty".to_string(),
            });
        }
        if !(1..=16).contains(&self.perf.max_workers) {
            return Err(RepoMapError::ConfigError {
                message: format!(
                    "perf.max_workers must be within 1..=16, got {}",
                    self.perf.max_workers
                ),
            });
        }
        if !(100..=10_000).contains(&self.perf.cache_size) {
            return Err(RepoMapError::ConfigError {
                message: format!(
                    "perf.cache_size must be within 100..=10000, got {}",
                    self.perf.cache_size
                ),
            });
        }
        if self.fuzzy.threshold > 100 {
            return Err(RepoMapError::ConfigError {
                message: "fuzzy.threshold must be within 0..=100".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.semantic.threshold) {
            return Err(RepoMapError::ConfigError {
                message: "semantic.threshold must be within 0.0..=1.0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
