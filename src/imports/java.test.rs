use super::*;

#[test]
fn extracts_dotted_import() {
    let imports = extract("package com.example;\nimport com.example.util.Helper;\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module, "com.example.util.Helper");
}

#[test]
fn drops_static_imports() {
    let imports = extract("import static java.util.Collections.emptyList;\nimport java.util.List;\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module, "java.util.List");
}

#[test]
fn line_number_matches_statement() {
    let imports = extract("package p;\n\nimport java.util.List;\n");
    assert_eq!(imports[0].line, 3);
}
