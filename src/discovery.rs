//! File discovery (C1).
//!
//! Walks a project tree honoring a `.gitignore` subset and a fixed baseline
//! exclude list, emitting project-relative paths whose extension is in the
//! configured analyzable set.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use globset::GlobSet;
use globset::GlobSetBuilder;

use crate::error::RepoMapError;
use crate::error::Result;
use crate::types::DEFAULT_ANALYZABLE_EXTENSIONS;

/// Directories skipped unconditionally, independent of `.gitignore` contents
/// (§4.1 supplemental) — a missing or empty `.gitignore` must not force a
/// full `node_modules`-grade walk.
const BASELINE_EXCLUDE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "dist",
    "build",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    ".next",
    ".nuxt",
    "vendor",
];

/// A compiled `.gitignore` subset matcher (§6: literal prefixes, `dir/`
/// directory patterns, `*`-prefixed globs; blank lines and `#`-comments
/// ignored; negation not required).
#[derive(Debug, Clone)]
pub struct GitignoreMatcher {
    dir_patterns: Vec<String>,
    literal_prefixes: Vec<String>,
    globs: GlobSet,
}

impl GitignoreMatcher {
    /// Parse a `.gitignore` file's contents into a matcher.
    pub fn parse(content: &str) -> Self {
        let mut dir_patterns = Vec::new();
        let mut literal_prefixes = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(dir) = line.strip_suffix('/') {
                dir_patterns.push(dir.trim_start_matches('/').to_string());
            } else if let Some(glob) = line.strip_prefix('*') {
                // `*`-prefixed globs matched against project-relative paths.
                let pattern = format!("**/*{glob}");
                if let Ok(compiled) = Glob::new(&pattern) {
                    builder.add(compiled);
                }
            } else {
                literal_prefixes.push(line.trim_start_matches('/').to_string());
            }
        }

        let globs = builder.build().unwrap_or_else(|_| GlobSet::empty());

        Self {
            dir_patterns,
            literal_prefixes,
            globs,
        }
    }

    /// Load a matcher from a `.gitignore` at the given project root. An
    /// absent file yields an empty (never-matching) matcher.
    pub fn load(root: &Path) -> Self {
        let path = root.join(".gitignore");
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::parse(""),
        }
    }

    /// Whether `rel_path` (project-relative, forward-slash separated) is ignored.
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        for dir in &self.dir_patterns {
            if rel_path == dir || rel_path.starts_with(&format!("{dir}/")) {
                return true;
            }
        }
        for prefix in &self.literal_prefixes {
            if rel_path == prefix || rel_path.starts_with(&format!("{prefix}/")) {
                return true;
            }
        }
        self.globs.is_match(rel_path)
    }
}

/// Discovers analyzable files under a project root.
pub struct FileDiscovery {
    analyzable_extensions: HashSet<String>,
    follow_symlinks: bool,
}

impl Default for FileDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDiscovery {
    pub fn new() -> Self {
        Self {
            analyzable_extensions: DEFAULT_ANALYZABLE_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            follow_symlinks: true,
        }
    }

    pub fn with_extensions(extensions: impl IntoIterator<Item = String>) -> Self {
        Self {
            analyzable_extensions: extensions.into_iter().collect(),
            follow_symlinks: true,
        }
    }

    /// Walk `root`, returning project-relative analyzable file paths.
    ///
    /// Ordering is unspecified but deterministic across invocations on an
    /// unchanged filesystem (walkdir visits directory entries in the order
    /// the filesystem/OS returns them, which is stable between runs absent
    /// filesystem mutation).
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            return Err(RepoMapError::IoError {
                path: root.to_path_buf(),
                cause: "project root does not exist".to_string(),
            });
        }

        let gitignore = GitignoreMatcher::load(root);
        let mut seen_canonical = HashSet::new();
        let mut out = Vec::new();

        let walker = walkdir::WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                let name = entry.file_name().to_string_lossy();
                if entry.depth() > 0 && BASELINE_EXCLUDE_DIRS.contains(&name.as_ref()) {
                    return false;
                }
                if entry.depth() > 0
                    && let Ok(rel) = entry.path().strip_prefix(root)
                    && gitignore.is_ignored(&to_forward_slash(rel))
                {
                    return false;
                }
                true
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let rel = match path.strip_prefix(root) {
                Ok(r) => r,
                Err(_) => continue,
            };
            let rel_str = to_forward_slash(rel);

            if gitignore.is_ignored(&rel_str) {
                continue;
            }

            let ext_matches = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| self.analyzable_extensions.contains(&e.to_ascii_lowercase()));
            if !ext_matches {
                continue;
            }

            if path.is_symlink() {
                match path.canonicalize() {
                    Ok(canonical) => {
                        if !seen_canonical.insert(canonical) {
                            continue;
                        }
                    }
                    Err(_) => continue,
                }
            }

            out.push(rel.to_path_buf());
        }

        Ok(out)
    }
}

fn to_forward_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "discovery.test.rs"]
mod tests;
