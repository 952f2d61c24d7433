use super::*;
use tempfile::tempdir;

fn import(module: &str, is_relative: bool, relative_level: u32) -> Import {
    Import {
        module: module.to_string(),
        alias: None,
        symbols: Vec::new(),
        is_relative,
        relative_level,
        kind: if is_relative { ImportKind::Relative } else { ImportKind::Absolute },
        line: 1,
        resolved_path: None,
    }
}

#[test]
fn resolves_python_relative_import() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::create_dir_all(root.join("pkg")).unwrap();
    std::fs::write(root.join("pkg/__init__.py"), "").unwrap();
    std::fs::write(root.join("pkg/helper.py"), "").unwrap();

    let mut imp = import("helper", true, 1);
    resolve(&mut imp, Path::new("pkg/main.py"), root, Language::Python);
    assert_eq!(imp.resolved_path, Some(PathBuf::from("pkg/helper.py")));
    assert_eq!(imp.kind, ImportKind::Relative);
}

#[test]
fn resolves_python_absolute_import_from_root() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("util.py"), "").unwrap();

    let mut imp = import("util", false, 0);
    resolve(&mut imp, Path::new("main.py"), root, Language::Python);
    assert_eq!(imp.resolved_path, Some(PathBuf::from("util.py")));
}

#[test]
fn unresolved_python_import_is_marked_external() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("main.py"), "").unwrap();

    let mut imp = import("numpy", false, 0);
    resolve(&mut imp, Path::new("main.py"), root, Language::Python);
    assert_eq!(imp.resolved_path, None);
    assert_eq!(imp.kind, ImportKind::External);
}

#[test]
fn resolves_js_relative_import_with_parent_hop() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::create_dir_all(root.join("src/lib")).unwrap();
    std::fs::write(root.join("src/util.ts"), "").unwrap();

    let mut imp = import("../util", true, 0);
    resolve(&mut imp, Path::new("src/lib/main.ts"), root, Language::TypeScript);
    assert_eq!(imp.resolved_path, Some(PathBuf::from("src/util.ts")));
}

#[test]
fn resolves_java_import_via_detected_source_root() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::create_dir_all(root.join("src/main/java/com/example/util")).unwrap();
    std::fs::write(root.join("src/main/java/com/example/util/Helper.java"), "").unwrap();

    let mut imp = import("com.example.util.Helper", false, 0);
    resolve(
        &mut imp,
        Path::new("src/main/java/com/example/App.java"),
        root,
        Language::Java,
    );
    assert_eq!(
        imp.resolved_path,
        Some(PathBuf::from("src/main/java/com/example/util/Helper.java"))
    );
}

#[test]
fn resolves_go_import_to_a_file_in_the_package_directory() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::create_dir_all(root.join("internal/util")).unwrap();
    std::fs::write(root.join("internal/util/util.go"), "").unwrap();

    let mut imp = import("internal/util", false, 0);
    resolve(&mut imp, Path::new("main.go"), root, Language::Go);
    assert_eq!(imp.resolved_path, Some(PathBuf::from("internal/util/util.go")));
}

#[test]
fn unmatched_go_import_is_external() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    std::fs::write(root.join("main.go"), "").unwrap();

    let mut imp = import("fmt", false, 0);
    resolve(&mut imp, Path::new("main.go"), root, Language::Go);
    assert_eq!(imp.resolved_path, None);
    assert_eq!(imp.kind, ImportKind::External);
}
