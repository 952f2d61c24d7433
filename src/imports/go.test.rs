use super::*;

#[test]
fn single_import() {
    let imports = extract("package main\n\nimport \"fmt\"\n");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0].module, "fmt");
}

#[test]
fn grouped_import() {
    let imports = extract("import (\n\t\"fmt\"\n\t\"os\"\n\t\"myproject/internal/util\"\n)\n");
    assert_eq!(imports.len(), 3);
    assert!(imports.iter().any(|i| i.module == "fmt"));
    assert!(imports.iter().any(|i| i.module == "myproject/internal/util"));
}

#[test]
fn grouped_entries_get_increasing_line_numbers() {
    let imports = extract("import (\n\t\"fmt\"\n\t\"os\"\n)\n");
    assert!(imports[0].line < imports[1].line);
}
