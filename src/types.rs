//! Core data model shared across every component: tags, imports, graph nodes,
//! match results, and the centrality/impact report shapes.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Kind of a [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagKind {
    Definition,
    Reference,
    Import,
}

/// A single named entity extracted from a source file.
///
/// Tags have value semantics: two tags with identical fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub kind: TagKind,
    pub path: PathBuf,
    /// 1-based line number.
    pub line: u32,
    pub language: Option<Language>,
}

/// A file path and the ordered tags extracted from it, plus the cache key
/// (mtime, size) recorded at extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTags {
    pub path: PathBuf,
    pub tags: Vec<Tag>,
    pub mtime_secs: i64,
    pub size_bytes: u64,
}

/// The closed set of languages the tag extractor and import analyzer
/// recognize, dispatched by file extension (§9 Design Notes: polymorphism
/// over languages is a closed variant set, not an open class hierarchy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Go,
    C,
    Cpp,
    CSharp,
}

impl Language {
    /// Dispatch on file extension. Returns `None` for unrecognized extensions.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "py" => Some(Self::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "tsx" => Some(Self::TypeScript),
            "java" => Some(Self::Java),
            "go" => Some(Self::Go),
            "c" | "h" => Some(Self::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" => Some(Self::Cpp),
            "cs" => Some(Self::CSharp),
            _ => None,
        }
    }

    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// The analyzable extension set recognized by default (§4.1).
pub const DEFAULT_ANALYZABLE_EXTENSIONS: &[&str] =
    &["py", "js", "ts", "jsx", "tsx", "java", "go", "c", "cpp", "h", "cs"];

/// How an [`Import`] refers to its module, relative to the importing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImportKind {
    Absolute,
    Relative,
    External,
}

/// A single import statement as written in source, plus resolution state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Module name or path as written (e.g. `..pkg.mod`, `./util`, `java.util.List`).
    pub module: String,
    pub alias: Option<String>,
    pub symbols: Vec<String>,
    pub is_relative: bool,
    /// Number of leading dots for Python-style relative imports; 0 otherwise.
    pub relative_level: u32,
    pub kind: ImportKind,
    /// 1-based source line.
    pub line: u32,
    /// Project-relative path of the resolved target file, if resolution succeeded.
    pub resolved_path: Option<PathBuf>,
}

impl Import {
    pub fn is_resolved(&self) -> bool {
        self.resolved_path.is_some()
    }
}

/// All imports extracted from one file, in source order. At most one
/// `FileImports` exists per file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileImports {
    pub path: PathBuf,
    pub imports: Vec<Import>,
    pub language: Language,
}

/// A node in the [`crate::graph::DependencyGraph`]. Adjacency is modeled as
/// path sets rather than owning pointers (§9: no pointer cycles).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub path: PathBuf,
    pub imports: BTreeSet<PathBuf>,
    pub imported_by: BTreeSet<PathBuf>,
    pub defined_functions: Vec<String>,
    pub defined_classes: Vec<String>,
}

impl DependencyNode {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            imports: BTreeSet::new(),
            imported_by: BTreeSet::new(),
            defined_functions: Vec::new(),
            defined_classes: Vec::new(),
        }
    }
}

/// Which matcher strategy produced a [`MatchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchKind {
    Fuzzy,
    Semantic,
    Hybrid,
}

/// One scored match of a query against an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub identifier: String,
    /// Clamped to [0, 1].
    pub score: f64,
    pub strategy: String,
    pub kind: MatchKind,
    pub path: Option<PathBuf>,
    pub line: Option<u32>,
    pub context: Option<String>,
}

impl MatchResult {
    pub fn clamp_score(mut self) -> Self {
        self.score = self.score.clamp(0.0, 1.0);
        self
    }
}

/// Ordering for [`MatchResult`] lists: score descending, identifier ascending
/// tie-break.
pub fn sort_match_results(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.identifier.cmp(&b.identifier))
    });
}

/// A search request against the identifier universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub kind: MatchKind,
    pub threshold: f64,
    pub max_results: usize,
}

/// The response to a [`SearchRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub request: SearchRequest,
    pub total: usize,
    pub results: Vec<MatchResult>,
    pub elapsed_ms: u64,
    pub cache_hit: bool,
}

/// Per-algorithm centrality scores plus the composite vector (§4.8).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralityVector {
    pub degree: std::collections::HashMap<PathBuf, f64>,
    pub betweenness: std::collections::HashMap<PathBuf, f64>,
    pub pagerank: std::collections::HashMap<PathBuf, f64>,
    pub eigenvector: Option<std::collections::HashMap<PathBuf, f64>>,
    pub closeness: Option<std::collections::HashMap<PathBuf, f64>>,
    pub composite: std::collections::HashMap<PathBuf, f64>,
    /// Which algorithms contributed to `composite` this run (§4.8 supplemental:
    /// omitted algorithms are absent here rather than null-valued in the vector).
    pub contributing_algorithms: Vec<String>,
}

/// Breaking-change risk bucket for a single impacted file (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Per-file detail backing an [`ImpactReport`]'s risk bucket (§4.9 supplemental).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactDetail {
    pub path: PathBuf,
    pub risk: RiskLevel,
    pub fan_in: usize,
    pub high_fan_in: bool,
    pub widely_depended_upon: bool,
}

/// The result of an impact analysis over a set of changed files (§4.9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub changed_files: BTreeSet<PathBuf>,
    pub direct_dependents: BTreeSet<PathBuf>,
    pub transitive_dependents: BTreeSet<PathBuf>,
    pub risk_score: f64,
    pub details: Vec<ImpactDetail>,
    pub suggested_tests: Vec<PathBuf>,
}

/// Classification of a definition-kind [`Tag`] by naming convention alone
/// (§4.10: the core has no type information to classify by).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    Function,
    Class,
    Constant,
    Variable,
    Other,
}

/// Per-extension file counts backing [`ProjectInfo::file_types`].
pub type FileTypeHistogram = std::collections::HashMap<String, usize>;

/// Per-[`IdentifierKind`] counts backing [`ProjectInfo::identifier_kinds`].
pub type IdentifierKindHistogram = std::collections::HashMap<IdentifierKind, usize>;

/// Summary returned by [`crate::facade::Facade::analyze_project`] (§4.10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub file_count: usize,
    pub identifier_count: usize,
    pub file_types: FileTypeHistogram,
    pub identifier_kinds: IdentifierKindHistogram,
    pub elapsed_ms: u64,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
#[path = "types.test.rs"]
mod tests;
