//! Go import extraction by regex (§4.6): single `import "fmt"` and grouped
//! `import ( "fmt" "os" )` forms.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::Import;
use crate::types::ImportKind;

static SINGLE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"import\s+"([^"]+)""#).unwrap());
static GROUPED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"import\s*\(\s*((?:[^)]+))\)"#).unwrap());
static GROUPED_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).unwrap());

fn line_at(source: &str, byte_offset: usize) -> u32 {
    source[..byte_offset].matches('\n').count() as u32 + 1
}

/// Extracts imports from Go source.
pub fn extract(source: &str) -> Vec<Import> {
    let mut imports = Vec::new();

    for caps in GROUPED.captures_iter(source) {
        let block = caps.get(1).unwrap();
        for entry in GROUPED_ENTRY.captures_iter(block.as_str()) {
            let module = entry[1].to_string();
            let offset = block.start() + entry.get(0).unwrap().start();
            imports.push(Import {
                module,
                alias: None,
                symbols: Vec::new(),
                is_relative: false,
                relative_level: 0,
                kind: ImportKind::Absolute,
                line: line_at(source, offset),
                resolved_path: None,
            });
        }
    }

    for caps in SINGLE.captures_iter(source) {
        let whole = caps.get(0).unwrap();
        // Skip single imports that are actually the opening line of a grouped
        // form already covered above (`import (` never matches SINGLE since
        // it requires a quoted string immediately after `import`).
        imports.push(Import {
            module: caps[1].to_string(),
            alias: None,
            symbols: Vec::new(),
            is_relative: false,
            relative_level: 0,
            kind: ImportKind::Absolute,
            line: line_at(source, whole.start()),
            resolved_path: None,
        });
    }

    imports.sort_by_key(|i| i.line);
    imports
}

#[cfg(test)]
#[path = "go.test.rs"]
mod tests;
