//! Tag extraction using tree-sitter-tags (C2).
//!
//! Extracts function, method, class, and interface definitions and call
//! references from source text, keyed by the closed [`Language`] set.

use std::path::Path;

use tree_sitter_tags::TagsContext;

use super::languages;
use crate::error::RepoMapError;
use crate::error::Result;
use crate::types::FileTags;
use crate::types::Language;
use crate::types::Tag;
use crate::types::TagKind;

/// Extracts [`Tag`]s from source files using tree-sitter-tags.
///
/// Holds a reusable [`TagsContext`]; not `Sync` (tree-sitter contexts are not
/// shareable across threads), so callers running extraction in parallel
/// (C4) must create one `TagExtractor` per worker.
pub struct TagExtractor {
    context: TagsContext,
}

impl Default for TagExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TagExtractor {
    pub fn new() -> Self {
        Self {
            context: TagsContext::new(),
        }
    }

    /// Extracts tags from a file on disk, recording its mtime and size for
    /// the cache key (C3 consumes the returned [`FileTags`] directly).
    pub fn extract_file(&mut self, path: &Path) -> Result<FileTags> {
        let metadata = std::fs::metadata(path).map_err(|e| RepoMapError::IoError {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;
        let mtime_secs = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        let source = std::fs::read_to_string(path).map_err(|e| RepoMapError::IoError {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;

        let language = Language::from_path(path).ok_or_else(|| RepoMapError::ParseError {
            path: path.to_path_buf(),
            cause: "unsupported language extension".to_string(),
        })?;

        let tags = self.extract(&source, path, language)?;

        Ok(FileTags {
            path: path.to_path_buf(),
            tags,
            mtime_secs,
            size_bytes: metadata.len(),
        })
    }

    /// Extracts tags from in-memory source text already known to be `language`.
    pub fn extract(&mut self, source: &str, path: &Path, language: Language) -> Result<Vec<Tag>> {
        let config = languages::tags_configuration(language)?;
        let source_bytes = source.as_bytes();

        let (tags, syntax_type_names) = self
            .context
            .generate_tags(&config, source_bytes, None)
            .map_err(|e| RepoMapError::ParseError {
                path: path.to_path_buf(),
                cause: format!("tag generation failed: {e}"),
            })?;

        let mut result = Vec::new();
        for tag in tags {
            let tag = tag.map_err(|e| RepoMapError::ParseError {
                path: path.to_path_buf(),
                cause: format!("tag error: {e}"),
            })?;

            let name_range = tag.name_range.clone();
            let name = std::str::from_utf8(&source_bytes[name_range.start..name_range.end])
                .unwrap_or("")
                .to_string();
            if name.is_empty() {
                continue;
            }

            let line = source[..tag.range.start].matches('\n').count() as u32 + 1;
            // Capture names follow the `@definition.*` / `@reference.*`
            // convention (§4.2); an `import` suffix (e.g. `@reference.import`)
            // yields an import-kind tag regardless of the definition/reference
            // bit tree-sitter-tags otherwise reports.
            let syntax_type = syntax_type_names
                .get(tag.syntax_type_id as usize)
                .map(String::as_str)
                .unwrap_or("");
            let kind = if syntax_type.contains("import") {
                TagKind::Import
            } else if tag.is_definition {
                TagKind::Definition
            } else {
                TagKind::Reference
            };

            result.push(Tag {
                name,
                kind,
                path: path.to_path_buf(),
                line,
                language: Some(language),
            });
        }

        Ok(result)
    }
}

#[cfg(test)]
#[path = "extractor.test.rs"]
mod tests;
