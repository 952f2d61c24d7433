use super::*;
use tempfile::TempDir;

#[test]
fn extracts_python_function_and_class_definitions() {
    let source = "def helper():\n    pass\n\n\nclass Widget:\n    def render(self):\n        helper()\n";
    let mut extractor = TagExtractor::new();
    let tags = extractor
        .extract(source, Path::new("widget.py"), Language::Python)
        .expect("extraction should succeed");

    let definitions: Vec<&Tag> = tags.iter().filter(|t| t.kind == TagKind::Definition).collect();
    assert!(definitions.iter().any(|t| t.name == "helper"));
    assert!(definitions.iter().any(|t| t.name == "Widget"));

    let references: Vec<&Tag> = tags.iter().filter(|t| t.kind == TagKind::Reference).collect();
    assert!(references.iter().any(|t| t.name == "helper"));
}

#[test]
fn extracts_python_import_as_import_kind_tag() {
    let source = "import os\nfrom pkg.util import helper\n";
    let mut extractor = TagExtractor::new();
    let tags = extractor
        .extract(source, Path::new("main.py"), Language::Python)
        .expect("extraction should succeed");

    let imports: Vec<&Tag> = tags.iter().filter(|t| t.kind == TagKind::Import).collect();
    assert!(imports.iter().any(|t| t.name == "os"));
    assert!(imports.iter().any(|t| t.name == "pkg.util"));
}

#[test]
fn extracts_go_function_definition() {
    let source = "package main\n\nfunc Run() {\n}\n";
    let mut extractor = TagExtractor::new();
    let tags = extractor
        .extract(source, Path::new("main.go"), Language::Go)
        .expect("extraction should succeed");
    assert!(tags.iter().any(|t| t.name == "Run" && t.kind == TagKind::Definition));
}

#[test]
fn extract_file_populates_cache_key_fields() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("main.py");
    std::fs::write(&path, "def main():\n    pass\n").expect("write fixture");

    let mut extractor = TagExtractor::new();
    let file_tags = extractor.extract_file(&path).expect("extraction should succeed");

    assert_eq!(file_tags.path, path);
    assert!(file_tags.size_bytes > 0);
    assert!(file_tags.tags.iter().any(|t| t.name == "main"));
}

#[test]
fn extract_file_rejects_unsupported_extension() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("notes.txt");
    std::fs::write(&path, "hello\n").expect("write fixture");

    let mut extractor = TagExtractor::new();
    let result = extractor.extract_file(&path);
    assert!(result.is_err());
}
