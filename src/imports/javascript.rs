//! JavaScript/TypeScript import extraction by regex (§4.6): ES6 named,
//! default, and namespace imports, CommonJS `require`, and dynamic `import()`.
//! Shared by both languages since the import syntax they share is identical
//! and TypeScript-only constructs (type-only imports) don't change the
//! module-reference shape this analyzer cares about.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Import;
use crate::types::ImportKind;

static NAMED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\s*\{([^}]*)\}\s*from\s*['"]([^'"]+)['"]"#).unwrap());
static DEFAULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\s+(\w+)\s+from\s*['"]([^'"]+)['"]"#).unwrap());
static NAMESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\s*\*\s*as\s+(\w+)\s+from\s*['"]([^'"]+)['"]"#).unwrap());
static REQUIRE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:const|let|var)\s+[\w{}\s,]+=\s*require\s*\(\s*['"]([^'"]+)['"]"#).unwrap());
static DYNAMIC: Lazy<Regex> = Lazy::new(|| Regex::new(r#"import\s*\(\s*['"]([^'"]+)['"]"#).unwrap());

fn line_at(source: &str, byte_offset: usize) -> u32 {
    source[..byte_offset].matches('\n').count() as u32 + 1
}

fn module_kind(module: &str) -> (bool, ImportKind) {
    if module.starts_with('.') {
        (true, ImportKind::Relative)
    } else {
        (false, ImportKind::Absolute)
    }
}

/// Extracts imports from JavaScript or TypeScript source.
pub fn extract(source: &str) -> Vec<Import> {
    let mut imports = Vec::new();

    for caps in NAMESPACE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let alias = caps[1].to_string();
        let module = caps[2].to_string();
        let (is_relative, kind) = module_kind(&module);
        imports.push(Import {
            module,
            alias: Some(alias),
            symbols: vec!["*".to_string()],
            is_relative,
            relative_level: 0,
            kind,
            line: line_at(source, whole.start()),
            resolved_path: None,
        });
    }

    for caps in NAMED.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let module = caps[2].to_string();
        let (is_relative, kind) = module_kind(&module);
        let line = line_at(source, whole.start());
        for entry in caps[1].split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (name, alias) = match entry.split_once(" as ") {
                Some((n, a)) => (n.trim().to_string(), Some(a.trim().to_string())),
                None => (entry.to_string(), None),
            };
            imports.push(Import {
                module: module.clone(),
                alias,
                symbols: vec![name],
                is_relative,
                relative_level: 0,
                kind,
                line,
                resolved_path: None,
            });
        }
    }

    for caps in DEFAULT.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let binding = caps[1].to_string();
        let module = caps[2].to_string();
        let (is_relative, kind) = module_kind(&module);
        imports.push(Import {
            module,
            alias: Some(binding),
            symbols: Vec::new(),
            is_relative,
            relative_level: 0,
            kind,
            line: line_at(source, whole.start()),
            resolved_path: None,
        });
    }

    for caps in REQUIRE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let module = caps[1].to_string();
        let (is_relative, kind) = module_kind(&module);
        imports.push(Import {
            module,
            alias: None,
            symbols: Vec::new(),
            is_relative,
            relative_level: 0,
            kind,
            line: line_at(source, whole.start()),
            resolved_path: None,
        });
    }

    for caps in DYNAMIC.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let module = caps[1].to_string();
        let (is_relative, kind) = module_kind(&module);
        imports.push(Import {
            module,
            alias: None,
            symbols: Vec::new(),
            is_relative,
            relative_level: 0,
            kind,
            line: line_at(source, whole.start()),
            resolved_path: None,
        });
    }

    imports.sort_by_key(|i| i.line);
    imports
}

#[cfg(test)]
#[path = "javascript.test.rs"]
mod tests;
