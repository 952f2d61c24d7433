//! Centrality Engine (C8): per-node importance scores over the dependency
//! graph, memoized until the graph is rebuilt.

use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::VecDeque;
use std::path::PathBuf;

use once_cell::sync::OnceCell;

use crate::config::CentralityAlgorithm;
use crate::graph::DependencyGraph;
use crate::types::CentralityVector;

const PAGERANK_DAMPING: f64 = 0.85;
const PAGERANK_MAX_ITERATIONS: usize = 100;
const PAGERANK_TOLERANCE: f64 = 1e-6;
const EIGENVECTOR_MAX_ITERATIONS: usize = 100;
const EIGENVECTOR_TOLERANCE: f64 = 1e-6;

/// Computes and caches [`CentralityVector`]s for a [`DependencyGraph`].
///
/// One engine is created per graph generation; the facade drops it (along
/// with the graph) on `refresh()`.
pub struct CentralityEngine<'g> {
    graph: &'g DependencyGraph,
    algorithms: HashSet<CentralityAlgorithm>,
    cache: OnceCell<CentralityVector>,
}

impl<'g> CentralityEngine<'g> {
    pub fn new(graph: &'g DependencyGraph, algorithms: HashSet<CentralityAlgorithm>) -> Self {
        Self {
            graph,
            algorithms,
            cache: OnceCell::new(),
        }
    }

    /// Computes (or returns the memoized) composite [`CentralityVector`].
    pub fn scores(&self) -> &CentralityVector {
        self.cache.get_or_init(|| self.compute())
    }

    /// Paths ranked by composite score, descending, lexicographic tie-break.
    pub fn ranking(&self) -> Vec<PathBuf> {
        let scores = self.scores();
        let mut ranked: Vec<PathBuf> = scores.composite.keys().cloned().collect();
        ranked.sort_by(|a, b| {
            let sa = scores.composite.get(a).copied().unwrap_or(0.0);
            let sb = scores.composite.get(b).copied().unwrap_or(0.0);
            sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.cmp(b))
        });
        ranked
    }

    fn compute(&self) -> CentralityVector {
        let nodes: Vec<PathBuf> = self.graph.nodes().cloned().collect();
        let mut vector = CentralityVector::default();
        let mut contributing = Vec::new();
        let mut per_algorithm: Vec<HashMap<PathBuf, f64>> = Vec::new();

        if self.algorithms.contains(&CentralityAlgorithm::Degree) {
            vector.degree = degree_centrality(self.graph, &nodes);
            contributing.push("degree".to_string());
            per_algorithm.push(vector.degree.clone());
        }
        if self.algorithms.contains(&CentralityAlgorithm::Betweenness) {
            vector.betweenness = betweenness_centrality(self.graph, &nodes);
            contributing.push("betweenness".to_string());
            per_algorithm.push(vector.betweenness.clone());
        }
        if self.algorithms.contains(&CentralityAlgorithm::Pagerank) {
            vector.pagerank = pagerank(self.graph, &nodes);
            contributing.push("pagerank".to_string());
            per_algorithm.push(vector.pagerank.clone());
        }
        if self.algorithms.contains(&CentralityAlgorithm::Eigenvector)
            && let Some(scores) = eigenvector_centrality(self.graph, &nodes)
        {
            contributing.push("eigenvector".to_string());
            per_algorithm.push(scores.clone());
            vector.eigenvector = Some(scores);
        }
        if self.algorithms.contains(&CentralityAlgorithm::Closeness)
            && let Some(scores) = closeness_centrality(self.graph, &nodes)
        {
            contributing.push("closeness".to_string());
            per_algorithm.push(scores.clone());
            vector.closeness = Some(scores);
        }

        vector.composite = composite_from(&nodes, &per_algorithm);
        vector.contributing_algorithms = contributing;
        vector
    }
}

fn degree_centrality(graph: &DependencyGraph, nodes: &[PathBuf]) -> HashMap<PathBuf, f64> {
    let n = nodes.len();
    if n <= 1 {
        return nodes.iter().map(|p| (p.clone(), 0.0)).collect();
    }
    let denom = 2.0 * (n - 1) as f64;
    nodes
        .iter()
        .map(|p| {
            let in_deg = graph.dependents(p).len();
            let out_deg = graph.dependencies(p).len();
            (p.clone(), (in_deg + out_deg) as f64 / denom)
        })
        .collect()
}

/// Brandes' algorithm for directed, unweighted betweenness centrality,
/// normalized to [0, 1] by the maximum possible pair count `(n-1)(n-2)`.
fn betweenness_centrality(graph: &DependencyGraph, nodes: &[PathBuf]) -> HashMap<PathBuf, f64> {
    let n = nodes.len();
    let mut betweenness: HashMap<PathBuf, f64> = nodes.iter().map(|p| (p.clone(), 0.0)).collect();
    if n <= 2 {
        return betweenness;
    }

    for source in nodes {
        let mut stack: Vec<PathBuf> = Vec::new();
        let mut predecessors: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
        let mut sigma: HashMap<PathBuf, f64> = nodes.iter().map(|p| (p.clone(), 0.0)).collect();
        let mut distance: HashMap<PathBuf, i64> = nodes.iter().map(|p| (p.clone(), -1)).collect();
        sigma.insert(source.clone(), 1.0);
        distance.insert(source.clone(), 0);

        let mut queue: VecDeque<PathBuf> = VecDeque::from([source.clone()]);
        while let Some(v) = queue.pop_front() {
            stack.push(v.clone());
            for w in graph.dependencies(&v) {
                if distance[&w] < 0 {
                    distance.insert(w.clone(), distance[&v] + 1);
                    queue.push_back(w.clone());
                }
                if distance[&w] == distance[&v] + 1 {
                    let sv = sigma[&v];
                    *sigma.get_mut(&w).unwrap() += sv;
                    predecessors.entry(w.clone()).or_default().push(v.clone());
                }
            }
        }

        let mut delta: HashMap<PathBuf, f64> = nodes.iter().map(|p| (p.clone(), 0.0)).collect();
        while let Some(w) = stack.pop() {
            if let Some(preds) = predecessors.get(&w) {
                for v in preds {
                    let contribution = (sigma[v] / sigma[&w]) * (1.0 + delta[&w]);
                    *delta.get_mut(v).unwrap() += contribution;
                }
            }
            if w != *source {
                *betweenness.get_mut(&w).unwrap() += delta[&w];
            }
        }
    }

    let normalizer = ((n - 1) * (n - 2).max(1)) as f64;
    for value in betweenness.values_mut() {
        *value /= normalizer;
    }
    betweenness
}

/// PageRank over the weighted edge set (§4.7 supplemental weights), damping
/// 0.85, converged to `‖Δ‖∞ < 1e-6` or 100 iterations.
fn pagerank(graph: &DependencyGraph, nodes: &[PathBuf]) -> HashMap<PathBuf, f64> {
    let n = nodes.len();
    if n == 0 {
        return HashMap::new();
    }
    let mut scores: HashMap<PathBuf, f64> = nodes.iter().map(|p| (p.clone(), 1.0 / n as f64)).collect();

    let out_weight_sums: HashMap<PathBuf, f64> = nodes
        .iter()
        .map(|p| {
            let sum: f64 = graph
                .dependencies(p)
                .iter()
                .map(|t| graph.edge_weight(p, t).unwrap_or(1.0))
                .sum();
            (p.clone(), sum)
        })
        .collect();

    for _ in 0..PAGERANK_MAX_ITERATIONS {
        let mut next: HashMap<PathBuf, f64> = nodes
            .iter()
            .map(|p| (p.clone(), (1.0 - PAGERANK_DAMPING) / n as f64))
            .collect();

        let mut dangling_mass = 0.0;
        for p in nodes {
            let out_sum = out_weight_sums[p];
            if out_sum <= 0.0 {
                dangling_mass += scores[p];
                continue;
            }
            for target in graph.dependencies(p) {
                let w = graph.edge_weight(p, &target).unwrap_or(1.0);
                *next.get_mut(&target).unwrap() += PAGERANK_DAMPING * scores[p] * (w / out_sum);
            }
        }
        if dangling_mass > 0.0 {
            let share = PAGERANK_DAMPING * dangling_mass / n as f64;
            for value in next.values_mut() {
                *value += share;
            }
        }

        let delta = nodes
            .iter()
            .map(|p| (next[p] - scores[p]).abs())
            .fold(0.0_f64, f64::max);
        scores = next;
        if delta < PAGERANK_TOLERANCE {
            break;
        }
    }
    scores
}

/// Power iteration on the (unweighted, directed) adjacency matrix. `None` if
/// the graph is empty or the iteration fails to converge (§4.8 Open
/// Question resolution: omit rather than report null).
fn eigenvector_centrality(graph: &DependencyGraph, nodes: &[PathBuf]) -> Option<HashMap<PathBuf, f64>> {
    let n = nodes.len();
    if n == 0 {
        return None;
    }
    let mut scores: HashMap<PathBuf, f64> = nodes.iter().map(|p| (p.clone(), 1.0 / (n as f64).sqrt())).collect();

    for _ in 0..EIGENVECTOR_MAX_ITERATIONS {
        let mut next: HashMap<PathBuf, f64> = nodes.iter().map(|p| (p.clone(), 0.0)).collect();
        for p in nodes {
            for dependent in graph.dependents(p) {
                *next.get_mut(p).unwrap() += scores[&dependent];
            }
        }
        let norm = next.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return None;
        }
        for value in next.values_mut() {
            *value /= norm;
        }
        let delta = nodes
            .iter()
            .map(|p| (next[p] - scores[p]).abs())
            .fold(0.0_f64, f64::max);
        scores = next;
        if delta < EIGENVECTOR_TOLERANCE {
            return Some(scores);
        }
    }
    None
}

/// Reciprocal of the average shortest-path distance from each node, over
/// the directed graph. `None` for a graph with fewer than two nodes or one
/// where no node can reach any other (fully disconnected).
fn closeness_centrality(graph: &DependencyGraph, nodes: &[PathBuf]) -> Option<HashMap<PathBuf, f64>> {
    if nodes.len() < 2 {
        return None;
    }
    let mut scores = HashMap::new();
    let mut any_reachable = false;

    for source in nodes {
        let mut distance: HashMap<PathBuf, u64> = HashMap::new();
        distance.insert(source.clone(), 0);
        let mut queue = VecDeque::from([source.clone()]);
        while let Some(v) = queue.pop_front() {
            let dv = distance[&v];
            for w in graph.dependencies(&v) {
                if !distance.contains_key(&w) {
                    distance.insert(w.clone(), dv + 1);
                    queue.push_back(w);
                }
            }
        }
        let reachable: Vec<u64> = distance.values().copied().filter(|d| *d > 0).collect();
        if reachable.is_empty() {
            scores.insert(source.clone(), 0.0);
            continue;
        }
        any_reachable = true;
        let avg_distance = reachable.iter().sum::<u64>() as f64 / reachable.len() as f64;
        scores.insert(source.clone(), if avg_distance > 0.0 { 1.0 / avg_distance } else { 0.0 });
    }

    if any_reachable { Some(scores) } else { None }
}

fn composite_from(nodes: &[PathBuf], per_algorithm: &[HashMap<PathBuf, f64>]) -> HashMap<PathBuf, f64> {
    if per_algorithm.is_empty() {
        return nodes.iter().map(|p| (p.clone(), 0.0)).collect();
    }
    let mut raw: HashMap<PathBuf, f64> = nodes
        .iter()
        .map(|p| {
            let sum: f64 = per_algorithm.iter().filter_map(|scores| scores.get(p)).sum();
            (p.clone(), sum / per_algorithm.len() as f64)
        })
        .collect();

    let min = raw.values().copied().fold(f64::INFINITY, f64::min);
    let max = raw.values().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range <= f64::EPSILON {
        for value in raw.values_mut() {
            *value = 0.0;
        }
    } else {
        for value in raw.values_mut() {
            *value = (*value - min) / range;
        }
    }
    raw
}

#[cfg(test)]
#[path = "centrality.test.rs"]
mod tests;
