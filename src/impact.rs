//! Impact Analyzer (C9): reverse-dependency reachability and breaking-change
//! risk scoring for a set of changed files.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::path::Path;
use std::path::PathBuf;

use crate::graph::DependencyGraph;
use crate::types::ImpactDetail;
use crate::types::ImpactReport;
use crate::types::RiskLevel;

/// Dependents-count threshold for the "high fan-in" flag (§4.9 supplemental).
const HIGH_FAN_IN_THRESHOLD: usize = 5;
/// Fraction of total graph nodes a changed file's transitive closure must
/// reach to be flagged "widely depended upon" (§4.9 supplemental).
const WIDELY_DEPENDED_UPON_FRACTION: f64 = 0.10;

/// Risk bucket thresholds (§4.9 defaults).
const RISK_MEDIUM: f64 = 0.25;
const RISK_HIGH: f64 = 0.50;
const RISK_CRITICAL: f64 = 0.75;

/// Computes [`ImpactReport`]s over a [`DependencyGraph`] given precomputed
/// composite centrality scores (from C8).
pub struct ImpactAnalyzer<'g> {
    graph: &'g DependencyGraph,
    composite_centrality: &'g HashMap<PathBuf, f64>,
}

impl<'g> ImpactAnalyzer<'g> {
    pub fn new(graph: &'g DependencyGraph, composite_centrality: &'g HashMap<PathBuf, f64>) -> Self {
        Self {
            graph,
            composite_centrality,
        }
    }

    /// Analyzes the effect of changing `changed_files`. Files absent from
    /// the graph are dropped from the reachability computation (§4.9:
    /// "analyzing a non-existent file yields an empty ImpactReport with a
    /// diagnostic, never raises"); the caller ([`crate::facade::Facade::impact_of`])
    /// is responsible for recording the diagnostic for each absent file.
    pub fn analyze(&self, changed_files: &BTreeSet<PathBuf>) -> ImpactReport {
        let known: BTreeSet<PathBuf> = changed_files
            .iter()
            .filter(|p| self.graph.contains(p))
            .cloned()
            .collect();

        if known.is_empty() {
            return ImpactReport {
                changed_files: changed_files.clone(),
                direct_dependents: BTreeSet::new(),
                transitive_dependents: BTreeSet::new(),
                risk_score: 0.0,
                details: Vec::new(),
                suggested_tests: Vec::new(),
            };
        }

        let mut direct_dependents = BTreeSet::new();
        for path in &known {
            direct_dependents.extend(self.graph.dependents(path));
        }

        let transitive_dependents = self.transitive_closure(&direct_dependents);

        let node_count = self.graph.node_count().max(1);
        let transitive_ratio = transitive_dependents.len() as f64 / node_count as f64;
        let avg_centrality = known
            .iter()
            .map(|p| self.composite_centrality.get(p).copied().unwrap_or(0.0))
            .sum::<f64>()
            / known.len() as f64;
        let risk_score = (transitive_ratio * (0.5 + 0.5 * avg_centrality)).clamp(0.0, 1.0);

        let details = known
            .iter()
            .map(|path| self.detail_for(path, node_count))
            .collect::<Vec<_>>();

        let suggested_tests = self.suggest_tests(&known, &direct_dependents);

        ImpactReport {
            changed_files: changed_files.clone(),
            direct_dependents,
            transitive_dependents,
            risk_score,
            details,
            suggested_tests,
        }
    }

    fn transitive_closure(&self, seed: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
        let mut closure = BTreeSet::new();
        let mut queue: VecDeque<PathBuf> = seed.iter().cloned().collect();
        while let Some(path) = queue.pop_front() {
            if !closure.insert(path.clone()) {
                continue;
            }
            for dependent in self.graph.dependents(&path) {
                if !closure.contains(&dependent) {
                    queue.push_back(dependent);
                }
            }
        }
        closure
    }

    fn detail_for(&self, path: &Path, node_count: usize) -> ImpactDetail {
        let fan_in = self.graph.dependents(path).len();
        let reachable = self.transitive_closure(&self.graph.dependents(path));
        let widely_depended_upon =
            reachable.len() as f64 / node_count as f64 > WIDELY_DEPENDED_UPON_FRACTION;
        let centrality = self.composite_centrality.get(path).copied().unwrap_or(0.0);

        ImpactDetail {
            path: path.to_path_buf(),
            risk: risk_bucket(centrality),
            fan_in,
            high_fan_in: fan_in > HIGH_FAN_IN_THRESHOLD,
            widely_depended_upon,
        }
    }

    /// Test files located near each changed file or its direct dependents,
    /// matched by the conventional `test_X.py` / `X_test.py` naming pattern
    /// (§4.9).
    fn suggest_tests(&self, known: &BTreeSet<PathBuf>, direct_dependents: &BTreeSet<PathBuf>) -> Vec<PathBuf> {
        let mut candidates = BTreeSet::new();
        for path in known.iter().chain(direct_dependents.iter()) {
            let Some(dir) = path.parent() else { continue };
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            for sibling in self.graph.nodes() {
                if sibling.parent() != Some(dir) {
                    continue;
                }
                if is_test_file_for(sibling, stem, ext) {
                    candidates.insert(sibling.clone());
                }
            }
        }
        candidates.into_iter().collect()
    }
}

fn risk_bucket(centrality: f64) -> RiskLevel {
    if centrality >= RISK_CRITICAL {
        RiskLevel::Critical
    } else if centrality >= RISK_HIGH {
        RiskLevel::High
    } else if centrality >= RISK_MEDIUM {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Whether `candidate` reads as a test file for a source file with the
/// given stem/extension: `test_<stem>.<ext>` or `<stem>_test.<ext>`.
fn is_test_file_for(candidate: &Path, stem: &str, ext: &str) -> bool {
    let Some(candidate_ext) = candidate.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    if candidate_ext != ext {
        return false;
    }
    let Some(candidate_stem) = candidate.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    candidate_stem == format!("test_{stem}") || candidate_stem == format!("{stem}_test")
}

/// Whether a path reads as a test file by filename convention alone,
/// independent of any particular source stem (used by the facade's file
/// classification, if it needs to exclude test files from a histogram).
pub fn is_test_file(path: &Path) -> bool {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    stem.starts_with("test_") || stem.ends_with("_test") || stem.ends_with(".test")
}

#[cfg(test)]
#[path = "impact.test.rs"]
mod tests;
