use super::*;
use crate::types::ImportKind;

#[test]
fn plain_import_with_alias() {
    let imports = extract("import os, sys as system\n");
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].module, "os");
    assert_eq!(imports[0].alias, None);
    assert_eq!(imports[1].module, "sys");
    assert_eq!(imports[1].alias.as_deref(), Some("system"));
    assert_eq!(imports[0].kind, ImportKind::Absolute);
}

#[test]
fn dotted_plain_import() {
    let imports = extract("import a.b.c\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module, "a.b.c");
}

#[test]
fn from_import_with_multiple_symbols_and_alias() {
    let imports = extract("from mypkg.util import x, y as z\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module, "mypkg.util");
    assert_eq!(imports[0].symbols, vec!["x".to_string(), "y as z".to_string()]);
    assert_eq!(imports[0].alias, None);
    assert!(!imports[0].is_relative);
}

#[test]
fn relative_import_level_and_module() {
    let imports = extract("from ..pkg import helper\n");
    assert_eq!(imports.len(), 1);
    assert!(imports[0].is_relative);
    assert_eq!(imports[0].relative_level, 2);
    assert_eq!(imports[0].module, "pkg");
    assert_eq!(imports[0].kind, ImportKind::Relative);
}

#[test]
fn bare_relative_import_from_package() {
    let imports = extract("from . import utils\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].relative_level, 1);
    assert_eq!(imports[0].module, "");
    assert_eq!(imports[0].symbols, vec!["utils".to_string()]);
}

#[test]
fn wildcard_import() {
    let imports = extract("from pkg import *\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].symbols, vec!["*".to_string()]);
}

#[test]
fn line_numbers_are_one_based_and_track_source() {
    let imports = extract("x = 1\nimport os\n");
    assert_eq!(imports[0].line, 2);
}

#[test]
fn syntax_error_still_yields_recoverable_imports() {
    let imports = extract("import os\ndef broken(:\n");
    assert!(imports.iter().any(|i| i.module == "os"));
}
