use super::*;

#[test]
fn named_import_with_alias() {
    let imports = extract("import { a, b as c } from './util';\n");
    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].symbols, vec!["a".to_string()]);
    assert_eq!(imports[0].module, "./util");
    assert!(imports[0].is_relative);
    assert_eq!(imports[1].symbols, vec!["b".to_string()]);
    assert_eq!(imports[1].alias.as_deref(), Some("c"));
}

#[test]
fn default_import() {
    let imports = extract("import React from 'react';\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].alias.as_deref(), Some("React"));
    assert_eq!(imports[0].module, "react");
    assert!(!imports[0].is_relative);
}

#[test]
fn namespace_import() {
    let imports = extract("import * as path from 'path';\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].symbols, vec!["*".to_string()]);
    assert_eq!(imports[0].alias.as_deref(), Some("path"));
}

#[test]
fn commonjs_require() {
    let imports = extract("const fs = require('fs');\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module, "fs");
}

#[test]
fn dynamic_import() {
    let imports = extract("const mod = await import('./lazy');\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module, "./lazy");
    assert!(imports[0].is_relative);
}

#[test]
fn line_numbers_track_source_position() {
    let imports = extract("// header\n\nimport { a } from './a';\n");
    assert_eq!(imports[0].line, 3);
}
