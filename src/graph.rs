//! Dependency Graph (C7): a directed graph over files built from resolved
//! imports, with cycle detection and neighborhood queries.
//!
//! Nodes are addressed by project-relative path rather than owning pointers
//! (§9 Design Notes: no pointer cycles); the graph is its own arena and
//! adjacency is plain path sets.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

use once_cell::sync::OnceCell;

use crate::error::Diagnostic;
use crate::error::DiagnosticKind;
use crate::terms::classify_identifier_kind;
use crate::terms::is_well_named;
use crate::types::DependencyNode;
use crate::types::FileImports;
use crate::types::FileTags;
use crate::types::IdentifierKind;
use crate::types::TagKind;

/// Edge-weight tuning constants for the PageRank feed (§4.7 supplemental).
const PRIVATE_SYMBOL_WEIGHT: f64 = 0.1;
const MULTI_DEFINED_PENALTY: f64 = 0.1;
const MULTI_DEFINED_THRESHOLD: usize = 5;
const HUB_DAMPENING_THRESHOLD: usize = 10;
const WELL_NAMED_BOOST: f64 = 10.0;

/// Aggregate counters returned by [`DependencyGraph::statistics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub cycle_count: usize,
    pub root_count: usize,
    pub leaf_count: usize,
}

/// A directed graph of files, with imports/imported_by adjacency, cached
/// cycle enumeration, and PageRank-only edge weights.
///
/// Immutable after construction (§5: safe to share for read); the only
/// interior mutability is the memoized cycle list.
#[derive(Debug)]
pub struct DependencyGraph {
    nodes: BTreeMap<PathBuf, DependencyNode>,
    edge_weights: HashMap<(PathBuf, PathBuf), f64>,
    built_at: SystemTime,
    cycles: OnceCell<Vec<Vec<PathBuf>>>,
}

impl DependencyGraph {
    /// Builds the graph from the map produced by C6 (resolved imports) and
    /// the tag universe produced by C2/C4 (used only to populate each
    /// node's defined-function/defined-class name lists).
    ///
    /// Idempotent: the same inputs always produce a structurally identical
    /// graph. Size-limited: if the file set exceeds `max_graph_size` files,
    /// only the first N (in path order, for determinism) are included, and
    /// a diagnostic is returned for the caller to surface as a warning.
    pub fn build(
        file_imports: &HashMap<PathBuf, FileImports>,
        file_tags: &HashMap<PathBuf, FileTags>,
        max_graph_size: usize,
    ) -> (Self, Vec<Diagnostic>) {
        let mut diagnostics = Vec::new();
        let mut ordered_paths: Vec<&PathBuf> = file_imports.keys().collect();
        ordered_paths.sort();

        if ordered_paths.len() > max_graph_size {
            diagnostics.push(Diagnostic::new(
                PathBuf::new(),
                DiagnosticKind::Cache,
                format!(
                    "dependency graph truncated to {max_graph_size} of {} files",
                    ordered_paths.len()
                ),
            ));
            ordered_paths.truncate(max_graph_size);
        }
        let included: HashSet<&PathBuf> = ordered_paths.iter().copied().collect();

        let mut nodes: BTreeMap<PathBuf, DependencyNode> = BTreeMap::new();
        for path in &ordered_paths {
            nodes.insert((*path).clone(), DependencyNode::new((*path).clone()));
        }

        for path in &ordered_paths {
            let Some(imports) = file_imports.get(*path) else {
                continue;
            };
            for import in &imports.imports {
                let Some(target) = import.resolved_path.as_ref() else {
                    continue;
                };
                if target == *path {
                    continue; // no self-loops (§3 invariant)
                }
                if !included.contains(target) {
                    continue;
                }
                nodes.get_mut(*path).expect("path was just inserted").imports.insert(target.clone());
                nodes.get_mut(target).expect("target is in included set").imported_by.insert((*path).clone());
            }
        }

        for (path, node) in nodes.iter_mut() {
            if let Some(tags) = file_tags.get(path) {
                for tag in &tags.tags {
                    if tag.kind != TagKind::Definition {
                        continue;
                    }
                    match classify_identifier_kind(&tag.name) {
                        IdentifierKind::Function => node.defined_functions.push(tag.name.clone()),
                        IdentifierKind::Class => node.defined_classes.push(tag.name.clone()),
                        _ => {}
                    }
                }
            }
        }

        let edge_weights = compute_edge_weights(&nodes, file_tags);

        let graph = Self {
            nodes,
            edge_weights,
            built_at: SystemTime::now(),
            cycles: OnceCell::new(),
        };
        (graph, diagnostics)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PathBuf> {
        self.nodes.keys()
    }

    pub fn node(&self, path: &Path) -> Option<&DependencyNode> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn built_at(&self) -> SystemTime {
        self.built_at
    }

    /// Files `path` imports. Empty (not an error) if `path` is absent.
    pub fn dependencies(&self, path: &Path) -> BTreeSet<PathBuf> {
        self.nodes.get(path).map(|n| n.imports.clone()).unwrap_or_default()
    }

    /// Files that import `path`. Empty (not an error) if `path` is absent.
    pub fn dependents(&self, path: &Path) -> BTreeSet<PathBuf> {
        self.nodes.get(path).map(|n| n.imported_by.clone()).unwrap_or_default()
    }

    /// PageRank-only edge weight for `u -> v`; `1.0` for an edge with no
    /// discoverable symbol evidence, and absent for non-edges.
    pub fn edge_weight(&self, u: &Path, v: &Path) -> Option<f64> {
        if !self.nodes.get(u).is_some_and(|n| n.imports.contains(v)) {
            return None;
        }
        Some(
            self.edge_weights
                .get(&(u.to_path_buf(), v.to_path_buf()))
                .copied()
                .unwrap_or(1.0),
        )
    }

    /// Union of `dependencies` and `dependents` within `radius` hops.
    /// `radius = 0` returns an empty set (a path is never its own neighbor);
    /// absent paths also return an empty set.
    pub fn neighbors(&self, path: &Path, radius: usize) -> BTreeSet<PathBuf> {
        let mut visited: BTreeSet<PathBuf> = BTreeSet::new();
        if !self.nodes.contains_key(path) {
            return visited;
        }
        let mut frontier: BTreeSet<PathBuf> = BTreeSet::from([path.to_path_buf()]);
        visited.insert(path.to_path_buf());

        for _ in 0..radius {
            let mut next = BTreeSet::new();
            for node_path in &frontier {
                if let Some(node) = self.nodes.get(node_path) {
                    next.extend(node.imports.iter().cloned());
                    next.extend(node.imported_by.iter().cloned());
                }
            }
            next.retain(|p| visited.insert(p.clone()));
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        visited.remove(path);
        visited
    }

    /// Simple directed cycles, found via SCC decomposition followed by
    /// elementary-circuit enumeration within each non-trivial component
    /// (§4.7). Memoized until the graph is rebuilt: a `DependencyGraph` is
    /// never mutated in place, so this cache lives exactly as long as the
    /// graph itself.
    pub fn find_cycles(&self) -> &[Vec<PathBuf>] {
        self.cycles.get_or_init(|| find_cycles_impl(&self.nodes))
    }

    pub fn statistics(&self) -> GraphStatistics {
        let node_count = self.nodes.len();
        let edge_count = self.nodes.values().map(|n| n.imports.len()).sum();
        let cycle_count = self.find_cycles().len();
        let root_count = self.nodes.values().filter(|n| n.imported_by.is_empty()).count();
        let leaf_count = self.nodes.values().filter(|n| n.imports.is_empty()).count();
        GraphStatistics {
            node_count,
            edge_count,
            cycle_count,
            root_count,
            leaf_count,
        }
    }
}

/// Per-edge PageRank weights (§4.7 supplemental), derived from symbol-level
/// reference/definition overlap between the two files, layered on top of
/// the plain import adjacency. Edges with no discoverable symbol evidence
/// fall back to the base weight of `1.0` via [`DependencyGraph::edge_weight`].
fn compute_edge_weights(
    nodes: &BTreeMap<PathBuf, DependencyNode>,
    file_tags: &HashMap<PathBuf, FileTags>,
) -> HashMap<(PathBuf, PathBuf), f64> {
    // Global symbol definition/reference counts, used for the multi-defined
    // and hub-dampening terms below.
    let mut def_files: HashMap<&str, HashSet<&PathBuf>> = HashMap::new();
    let mut ref_files: HashMap<&str, HashSet<&PathBuf>> = HashMap::new();
    for (path, tags) in file_tags {
        for tag in &tags.tags {
            match tag.kind {
                TagKind::Definition => {
                    def_files.entry(tag.name.as_str()).or_default().insert(path);
                }
                TagKind::Reference => {
                    ref_files.entry(tag.name.as_str()).or_default().insert(path);
                }
                TagKind::Import => {}
            }
        }
    }

    let mut weights = HashMap::new();
    for (path, node) in nodes {
        let Some(referencing_tags) = file_tags.get(path) else {
            continue;
        };
        let referenced_names: HashSet<&str> = referencing_tags
            .tags
            .iter()
            .filter(|t| t.kind == TagKind::Reference)
            .map(|t| t.name.as_str())
            .collect();

        for target in &node.imports {
            let Some(target_tags) = file_tags.get(target) else {
                continue;
            };
            let mut weight = 0.0_f64;
            let mut matched = false;
            for def_tag in target_tags.tags.iter().filter(|t| t.kind == TagKind::Definition) {
                if !referenced_names.contains(def_tag.name.as_str()) {
                    continue;
                }
                matched = true;
                let mut symbol_weight = 1.0_f64;
                if def_tag.name.starts_with('_') {
                    symbol_weight *= PRIVATE_SYMBOL_WEIGHT;
                }
                if is_well_named(&def_tag.name) {
                    symbol_weight *= WELL_NAMED_BOOST;
                }
                if let Some(defs) = def_files.get(def_tag.name.as_str())
                    && defs.len() > MULTI_DEFINED_THRESHOLD
                {
                    symbol_weight *= MULTI_DEFINED_PENALTY;
                }
                if let Some(refs) = ref_files.get(def_tag.name.as_str())
                    && refs.len() > HUB_DAMPENING_THRESHOLD
                {
                    symbol_weight *= (HUB_DAMPENING_THRESHOLD as f64 / refs.len() as f64).sqrt();
                }
                weight += symbol_weight;
            }
            if matched {
                weights.insert((path.clone(), target.clone()), weight.max(f64::MIN_POSITIVE));
            }
        }
    }
    weights
}

/// SCC decomposition (iterative Tarjan, to avoid recursion-depth limits on
/// large graphs) followed by elementary-circuit enumeration within each
/// non-trivial component.
fn find_cycles_impl(nodes: &BTreeMap<PathBuf, DependencyNode>) -> Vec<Vec<PathBuf>> {
    let components = strongly_connected_components(nodes);
    let mut cycles = Vec::new();
    for component in components {
        if component.len() < 2 {
            continue;
        }
        let component_set: BTreeSet<PathBuf> = component.iter().cloned().collect();
        enumerate_elementary_circuits(nodes, &component_set, &mut cycles);
    }
    cycles
}

enum SccFrame<'a> {
    Enter(&'a PathBuf),
    Exit(&'a PathBuf),
}

fn strongly_connected_components(nodes: &BTreeMap<PathBuf, DependencyNode>) -> Vec<Vec<PathBuf>> {
    let mut index_counter = 0usize;
    let mut indices: HashMap<&PathBuf, usize> = HashMap::new();
    let mut low_links: HashMap<&PathBuf, usize> = HashMap::new();
    let mut on_stack: HashSet<&PathBuf> = HashSet::new();
    let mut stack: Vec<&PathBuf> = Vec::new();
    let mut result: Vec<Vec<PathBuf>> = Vec::new();

    for start in nodes.keys() {
        if indices.contains_key(start) {
            continue;
        }
        let mut work: Vec<SccFrame> = vec![SccFrame::Enter(start)];
        while let Some(frame) = work.pop() {
            match frame {
                SccFrame::Enter(v) => {
                    if indices.contains_key(v) {
                        continue;
                    }
                    indices.insert(v, index_counter);
                    low_links.insert(v, index_counter);
                    index_counter += 1;
                    stack.push(v);
                    on_stack.insert(v);

                    work.push(SccFrame::Exit(v));
                    if let Some(node) = nodes.get(v) {
                        for target in &node.imports {
                            if !indices.contains_key(target) {
                                work.push(SccFrame::Enter(target));
                            } else if on_stack.contains(target) {
                                let lv = low_links[v].min(indices[target]);
                                low_links.insert(v, lv);
                            }
                        }
                    }
                }
                SccFrame::Exit(v) => {
                    if let Some(node) = nodes.get(v) {
                        for target in &node.imports {
                            if on_stack.contains(target) {
                                let lv = low_links[v].min(low_links[target]);
                                low_links.insert(v, lv);
                            }
                        }
                    }
                    if low_links[v] == indices[v] {
                        let mut component = Vec::new();
                        loop {
                            let w = stack.pop().expect("scc stack underflow");
                            on_stack.remove(w);
                            component.push(w.clone());
                            if w == v {
                                break;
                            }
                        }
                        result.push(component);
                    }
                }
            }
        }
    }
    result
}

/// Backtracking enumeration of elementary (simple) circuits within a single
/// SCC, in the style of Johnson's algorithm: a DFS from each candidate
/// start node, blocking already-visited nodes within the current path so no
/// node repeats, restricted to targets not lexicographically before `start`
/// so each circuit is only discovered from its smallest member.
fn enumerate_elementary_circuits(
    nodes: &BTreeMap<PathBuf, DependencyNode>,
    component: &BTreeSet<PathBuf>,
    out: &mut Vec<Vec<PathBuf>>,
) {
    for start in component {
        let mut path = vec![start.clone()];
        let mut on_path: HashSet<PathBuf> = HashSet::from([start.clone()]);
        dfs_circuits(nodes, component, start, start, &mut path, &mut on_path, out);
    }
}

#[allow(clippy::too_many_arguments)]
fn dfs_circuits(
    nodes: &BTreeMap<PathBuf, DependencyNode>,
    component: &BTreeSet<PathBuf>,
    start: &PathBuf,
    current: &PathBuf,
    path: &mut Vec<PathBuf>,
    on_path: &mut HashSet<PathBuf>,
    out: &mut Vec<Vec<PathBuf>>,
) {
    let Some(node) = nodes.get(current) else {
        return;
    };
    for next in &node.imports {
        if !component.contains(next) {
            continue;
        }
        if next == start {
            out.push(path.clone());
            continue;
        }
        if on_path.contains(next) || next < start {
            continue;
        }
        path.push(next.clone());
        on_path.insert(next.clone());
        dfs_circuits(nodes, component, start, next, path, on_path, out);
        on_path.remove(next);
        path.pop();
    }
}

#[cfg(test)]
#[path = "graph.test.rs"]
mod tests;
