use super::*;
use tempfile::tempdir;

#[test]
fn analyze_project_resolves_a_local_import() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("util.py"), "VALUE = 1\n").unwrap();
    std::fs::write(root.join("main.py"), "import util\n").unwrap();

    let analyzer = ImportAnalyzer::new(root);
    let files = vec![PathBuf::from("main.py"), PathBuf::from("util.py")];
    let (result, diagnostics) = analyzer.analyze_project(&files);

    assert!(diagnostics.is_empty());
    let main = &result[&PathBuf::from("main.py")];
    assert_eq!(main.imports.len(), 1);
    assert_eq!(main.imports[0].resolved_path, Some(PathBuf::from("util.py")));
}

#[test]
fn unsupported_language_files_are_skipped_entirely() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("main.cpp"), "#include <vector>\n").unwrap();

    let analyzer = ImportAnalyzer::new(root);
    let files = vec![PathBuf::from("main.cpp")];
    let (result, diagnostics) = analyzer.analyze_project(&files);

    assert!(result.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn missing_file_yields_empty_imports_with_diagnostic() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();

    let analyzer = ImportAnalyzer::new(root);
    let (file_imports, diagnostics) = analyzer.analyze_file(Path::new("ghost.py")).unwrap();

    assert!(file_imports.imports.is_empty());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Io);
}

#[test]
fn extract_dispatches_on_language() {
    assert_eq!(extract("import os\n", Language::Python).len(), 1);
    assert_eq!(extract("import \"fmt\"\n", Language::Go).len(), 1);
    assert!(extract("#include <vector>\n", Language::Cpp).is_empty());
}
