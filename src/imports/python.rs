//! Python import extraction from the grammar-level parse tree (§4.6).
//!
//! Unlike the other languages here, Python imports are pulled directly off
//! the tree-sitter parse tree rather than by regex: the grammar already
//! distinguishes `import a, b as c` from `from M import x, y as z` and
//! carries the leading-dot count for relative imports as a dedicated node.

use tree_sitter::Node;
use tree_sitter::Parser;

use crate::types::Import;
use crate::types::ImportKind;

/// Extracts imports from Python source. Returns an empty list on a parser
/// construction failure or a tree that fails to build at all; a tree with
/// syntax errors still yields whatever import statements parsed cleanly,
/// since tree-sitter trees are error-tolerant.
pub fn extract(source: &str) -> Vec<Import> {
    let mut parser = Parser::new();
    if parser.set_language(&tree_sitter_python::LANGUAGE.into()).is_err() {
        return Vec::new();
    }
    let Some(tree) = parser.parse(source, None) else {
        return Vec::new();
    };

    let mut imports = Vec::new();
    walk(tree.root_node(), source, &mut imports);
    imports
}

fn walk(node: Node, source: &str, out: &mut Vec<Import>) {
    match node.kind() {
        "import_statement" => collect_import_statement(node, source, out),
        "import_from_statement" => collect_import_from_statement(node, source, out),
        _ => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                walk(child, source, out);
            }
        }
    }
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// `dotted_name := identifier ('.' identifier)*`
fn dotted_name_text(node: Node, source: &str) -> String {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == "identifier")
        .map(|c| node_text(c, source).to_string())
        .collect::<Vec<_>>()
        .join(".")
}

fn line_of(node: Node) -> u32 {
    node.start_position().row as u32 + 1
}

fn collect_import_statement(node: Node, source: &str, out: &mut Vec<Import>) {
    let line = line_of(node);
    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        push_plain_or_aliased(name_node, source, line, out);
    }
}

/// `import a, b as c`: each name is its own statement-level module, so this
/// still emits one Import per name (unlike `from M import ...`, which names
/// one module with many symbols — see [`collect_import_from_statement`]).
fn push_plain_or_aliased(name_node: Node, source: &str, line: u32, out: &mut Vec<Import>) {
    match name_node.kind() {
        "dotted_name" => {
            let name = dotted_name_text(name_node, source);
            out.push(Import {
                module: name,
                alias: None,
                symbols: Vec::new(),
                is_relative: false,
                relative_level: 0,
                kind: ImportKind::Absolute,
                line,
                resolved_path: None,
            });
        }
        "aliased_import" => {
            let Some(dotted) = name_node.child_by_field_name("name") else {
                return;
            };
            let name = dotted_name_text(dotted, source);
            let alias = name_node.child_by_field_name("alias").map(|a| node_text(a, source).to_string());
            out.push(Import {
                module: name,
                alias,
                symbols: Vec::new(),
                is_relative: false,
                relative_level: 0,
                kind: ImportKind::Absolute,
                line,
                resolved_path: None,
            });
        }
        _ => {}
    }
}

/// `from M import x, y as z`: one Import per statement, `module=M`, one
/// entry per imported name in `symbols` (the alias, if any, kept in the same
/// entry as `"y as z"` so it survives alongside the symbol it names — the
/// Import data model carries a single `alias` field, which applies to a
/// plain `import ... as ...` statement, not a multi-symbol `from` clause).
fn collect_import_from_statement(node: Node, source: &str, out: &mut Vec<Import>) {
    let line = line_of(node);
    let Some(module_node) = node.child_by_field_name("module_name") else {
        return;
    };

    let (module, is_relative, relative_level) = match module_node.kind() {
        "relative_import" => {
            let mut cursor = module_node.walk();
            let dots: u32 = module_node
                .children(&mut cursor)
                .filter(|c| c.kind() == "import_prefix")
                .map(|c| node_text(c, source).len() as u32)
                .sum();
            let mut cursor = module_node.walk();
            let rest = module_node
                .children(&mut cursor)
                .find(|c| c.kind() == "dotted_name")
                .map(|n| dotted_name_text(n, source))
                .unwrap_or_default();
            (rest, true, dots)
        }
        "dotted_name" => (dotted_name_text(module_node, source), false, 0),
        _ => (String::new(), false, 0),
    };
    let kind = if is_relative { ImportKind::Relative } else { ImportKind::Absolute };

    let mut wildcard_cursor = node.walk();
    if node.children(&mut wildcard_cursor).any(|c| c.kind() == "wildcard_import") {
        out.push(Import {
            module,
            alias: None,
            symbols: vec!["*".to_string()],
            is_relative,
            relative_level,
            kind,
            line,
            resolved_path: None,
        });
        return;
    }

    let mut symbols = Vec::new();
    let mut cursor = node.walk();
    for name_node in node.children_by_field_name("name", &mut cursor) {
        match name_node.kind() {
            "dotted_name" => {
                symbols.push(dotted_name_text(name_node, source));
            }
            "aliased_import" => {
                let Some(dotted) = name_node.child_by_field_name("name") else {
                    continue;
                };
                let name = dotted_name_text(dotted, source);
                match name_node.child_by_field_name("alias") {
                    Some(alias) => symbols.push(format!("{name} as {}", node_text(alias, source))),
                    None => symbols.push(name),
                }
            }
            _ => {}
        }
    }
    if symbols.is_empty() {
        return;
    }

    out.push(Import {
        module,
        alias: None,
        symbols,
        is_relative,
        relative_level,
        kind,
        line,
        resolved_path: None,
    });
}

#[cfg(test)]
#[path = "python.test.rs"]
mod tests;
