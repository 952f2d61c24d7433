//! Java import extraction by regex (§4.6): `import <dotted>;`, static
//! imports dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Import;
use crate::types::ImportKind;

static IMPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"import\s+([^;]+);").unwrap());

fn line_at(source: &str, byte_offset: usize) -> u32 {
    source[..byte_offset].matches('\n').count() as u32 + 1
}

/// Extracts imports from Java source.
pub fn extract(source: &str) -> Vec<Import> {
    let mut imports = Vec::new();
    for caps in IMPORT.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        let module = caps[1].trim().to_string();
        if module.starts_with("static ") {
            continue;
        }
        imports.push(Import {
            module,
            alias: None,
            symbols: Vec::new(),
            is_relative: false,
            relative_level: 0,
            kind: ImportKind::Absolute,
            line: line_at(source, whole.start()),
            resolved_path: None,
        });
    }
    imports
}

#[cfg(test)]
#[path = "java.test.rs"]
mod tests;
