//! Import resolution (§4.6): relative and in-project absolute references
//! resolved to project-relative file paths.

use std::path::Path;
use std::path::PathBuf;

use crate::types::Import;
use crate::types::ImportKind;
use crate::types::Language;

const PYTHON_EXTENSIONS: &[&str] = &["py"];
const JS_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Attempts to resolve `import` in place, given the project-relative path of
/// the file that contains it. Never fails: an unresolved reference is left
/// with `resolved_path = None` and, if it wasn't already tagged `Relative`,
/// is marked `External` (§4.6: "unresolvable references retain a null path
/// and are marked external").
pub fn resolve(import: &mut Import, file_path: &Path, project_root: &Path, language: Language) {
    let file_dir = file_path.parent().unwrap_or_else(|| Path::new(""));

    let resolved = match language {
        Language::Python => resolve_python(import, file_dir, project_root),
        Language::JavaScript | Language::TypeScript => resolve_js(import, file_dir, project_root),
        Language::Java => resolve_java(import, file_dir, project_root),
        Language::Go => resolve_go(import, project_root),
        _ => None,
    };

    match resolved {
        Some(path) => import.resolved_path = Some(path),
        None => {
            import.resolved_path = None;
            if import.kind != ImportKind::Relative {
                import.kind = ImportKind::External;
            }
        }
    }
}

fn exists_file(project_root: &Path, relative: &Path) -> bool {
    project_root.join(relative).is_file()
}

/// Probes `dir/<stem>.<ext>` and `dir/<stem>/<index_stem>.<ext>` (package- or
/// index-file style) for each candidate extension, returning the first
/// project-relative hit.
fn probe(project_root: &Path, dir: &Path, stem: &Path, extensions: &[&str], index_stem: &str) -> Option<PathBuf> {
    for ext in extensions {
        let direct = dir.join(format!("{}.{ext}", stem.display()));
        if exists_file(project_root, &direct) {
            return Some(direct);
        }
        let package_init = dir.join(stem).join(format!("{index_stem}.{ext}"));
        if exists_file(project_root, &package_init) {
            return Some(package_init);
        }
    }
    None
}

fn resolve_python(import: &Import, file_dir: &Path, project_root: &Path) -> Option<PathBuf> {
    let stem = PathBuf::from(import.module.replace('.', "/"));

    if import.is_relative {
        let mut target_dir = file_dir.to_path_buf();
        for _ in 1..import.relative_level {
            target_dir = target_dir.parent().map(Path::to_path_buf).unwrap_or(target_dir);
        }
        return probe(project_root, &target_dir, &stem, PYTHON_EXTENSIONS, "__init__");
    }

    // Absolute import: best-effort, no installed-package modeling (§4.6).
    // Try the full dotted path from the project root first, then fall back
    // to just the last segment relative to the importing file's directory.
    if !import.module.is_empty() {
        if let Some(hit) = probe(project_root, Path::new(""), &stem, PYTHON_EXTENSIONS, "__init__") {
            return Some(hit);
        }
    }
    let last = import.module.rsplit('.').next().unwrap_or(&import.module);
    probe(project_root, file_dir, Path::new(last), PYTHON_EXTENSIONS, "__init__")
}

fn resolve_js(import: &Import, file_dir: &Path, project_root: &Path) -> Option<PathBuf> {
    if !import.is_relative {
        // Bare package specifiers (npm packages) are never resolved locally.
        return None;
    }
    let mut path = import.module.as_str();
    let mut dir = file_dir.to_path_buf();
    loop {
        if let Some(rest) = path.strip_prefix("../") {
            dir = dir.parent().map(Path::to_path_buf).unwrap_or(dir);
            path = rest;
        } else if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else {
            break;
        }
    }
    probe(project_root, &dir, Path::new(path), JS_EXTENSIONS, "index")
}

fn resolve_java(import: &Import, file_dir: &Path, project_root: &Path) -> Option<PathBuf> {
    let segments: Vec<&str> = import.module.split('.').filter(|s| *s != "*").collect();
    let (first, _) = segments.split_first()?;

    let source_root = find_java_source_root(project_root, file_dir, first);
    let relative = PathBuf::from(segments.join("/")).with_extension("java");
    let candidate = source_root.join(&relative);
    if exists_file(project_root, &candidate) {
        return Some(candidate);
    }
    None
}

/// Walks upward from the importing file's directory to find the shallowest
/// ancestor that contains `first_segment` as a direct child directory,
/// falling back to the project root itself (§4.6 supplemental).
fn find_java_source_root(project_root: &Path, file_dir: &Path, first_segment: &str) -> PathBuf {
    let mut dir = file_dir.to_path_buf();
    loop {
        if project_root.join(&dir).join(first_segment).is_dir() {
            return dir;
        }
        if dir.as_os_str().is_empty() {
            return PathBuf::new();
        }
        dir = dir.parent().map(Path::to_path_buf).unwrap_or_default();
    }
}

/// Resolved only when the import path's last segment matches a directory
/// within the project root, per Go's package-per-directory convention;
/// standard-library and external module paths are left external without
/// attempting `GOPATH`/module-cache resolution (§4.6 supplemental). A Go
/// import names a package, not a file, but the graph (§4.7) links files, so
/// the resolved target is the lexicographically first `.go` file directly in
/// that package directory.
fn resolve_go(import: &Import, project_root: &Path) -> Option<PathBuf> {
    let full = PathBuf::from(&import.module);
    if let Some(file) = first_go_file_in(project_root, &full) {
        return Some(file);
    }
    let last = import.module.rsplit('/').next().unwrap_or(&import.module);
    first_go_file_in(project_root, Path::new(last))
}

fn first_go_file_in(project_root: &Path, package_dir: &Path) -> Option<PathBuf> {
    let absolute = project_root.join(package_dir);
    if !absolute.is_dir() {
        return None;
    }
    let mut go_files: Vec<PathBuf> = std::fs::read_dir(&absolute)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("go"))
        .map(|entry| package_dir.join(entry.file_name()))
        .collect();
    go_files.sort();
    go_files.into_iter().next()
}

#[cfg(test)]
#[path = "resolve.test.rs"]
mod tests;
