//! Import Analyzer (C6): language-dispatched extraction of import statements
//! plus resolution of relative and in-project absolute imports to files.

mod go;
mod java;
mod javascript;
mod python;
mod resolve;

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Diagnostic;
use crate::error::DiagnosticKind;
use crate::types::FileImports;
use crate::types::Language;

/// Extracts the raw (unresolved) imports from `source`, known to be
/// `language`. Returns an empty list for languages without a required
/// parser (§4.6 lists Python, JavaScript/TypeScript, Java, Go).
pub fn extract(source: &str, language: Language) -> Vec<crate::types::Import> {
    match language {
        Language::Python => python::extract(source),
        Language::JavaScript | Language::TypeScript => javascript::extract(source),
        Language::Java => java::extract(source),
        Language::Go => go::extract(source),
        Language::C | Language::Cpp | Language::CSharp => Vec::new(),
    }
}

/// Coordinates extraction and resolution across a project.
pub struct ImportAnalyzer {
    project_root: PathBuf,
}

impl ImportAnalyzer {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    /// Analyzes one file already known to exist under the project root.
    /// `path` is project-relative. Returns `None` for a language C6 has no
    /// parser for (C, C++, C#) — there is nothing to emit. Read/decode
    /// failures instead yield an empty `FileImports` plus a diagnostic,
    /// never aborting the caller (§4.6).
    pub fn analyze_file(&self, path: &Path) -> Option<(FileImports, Vec<Diagnostic>)> {
        let language = Language::from_path(path)?;
        if matches!(language, Language::C | Language::Cpp | Language::CSharp) {
            return None;
        }

        let full_path = self.project_root.join(path);
        let source = match std::fs::read_to_string(&full_path) {
            Ok(s) => s,
            Err(e) => {
                return Some((
                    FileImports {
                        path: path.to_path_buf(),
                        imports: Vec::new(),
                        language,
                    },
                    vec![Diagnostic::new(path, DiagnosticKind::Io, e.to_string())],
                ));
            }
        };

        let mut imports = extract(&source, language);
        for import in &mut imports {
            resolve::resolve(import, path, &self.project_root, language);
        }

        Some((
            FileImports {
                path: path.to_path_buf(),
                imports,
                language,
            },
            Vec::new(),
        ))
    }

    /// Analyzes every file in `files` (project-relative paths), skipping
    /// files in a language C6 has no parser for (C, C++, C#).
    pub fn analyze_project(&self, files: &[PathBuf]) -> (HashMap<PathBuf, FileImports>, Vec<Diagnostic>) {
        let mut result = HashMap::new();
        let mut diagnostics = Vec::new();

        for path in files {
            let Some((file_imports, file_diagnostics)) = self.analyze_file(path) else {
                continue;
            };
            diagnostics.extend(file_diagnostics);
            result.insert(path.clone(), file_imports);
        }

        (result, diagnostics)
    }
}

#[cfg(test)]
#[path = "mod.test.rs"]
mod tests;
