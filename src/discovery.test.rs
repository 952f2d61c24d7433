use super::*;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn gitignore_matches_dir_pattern() {
    let matcher = GitignoreMatcher::parse("build/\n");
    assert!(matcher.is_ignored("build/output.py"));
    assert!(matcher.is_ignored("build"));
    assert!(!matcher.is_ignored("rebuild.py"));
}

#[test]
fn gitignore_matches_literal_prefix() {
    let matcher = GitignoreMatcher::parse("secrets.py\n");
    assert!(matcher.is_ignored("secrets.py"));
    assert!(!matcher.is_ignored("other_secrets.py"));
}

#[test]
fn gitignore_matches_star_prefixed_glob() {
    let matcher = GitignoreMatcher::parse("*.min.js\n");
    assert!(matcher.is_ignored("dist/app.min.js"));
    assert!(!matcher.is_ignored("app.js"));
}

#[test]
fn gitignore_ignores_blank_lines_and_comments() {
    let matcher = GitignoreMatcher::parse("\n# a comment\n\nbuild/\n");
    assert!(matcher.is_ignored("build/x.py"));
}

#[test]
fn discover_skips_baseline_excluded_dirs_without_gitignore() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("src/main.py"), "print(1)\n");
    write(&temp.path().join("node_modules/pkg/index.js"), "x\n");

    let discovery = FileDiscovery::new();
    let files = discovery.discover(temp.path()).unwrap();
    assert_eq!(files, vec![PathBuf::from("src/main.py")]);
}

#[test]
fn discover_only_emits_analyzable_extensions() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("main.py"), "print(1)\n");
    write(&temp.path().join("README.md"), "hello\n");

    let discovery = FileDiscovery::new();
    let files = discovery.discover(temp.path()).unwrap();
    assert_eq!(files, vec![PathBuf::from("main.py")]);
}

#[test]
fn discover_honors_gitignore_file() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join(".gitignore"), "generated/\n");
    write(&temp.path().join("generated/code.py"), "x\n");
    write(&temp.path().join("main.py"), "print(1)\n");

    let discovery = FileDiscovery::new();
    let files = discovery.discover(temp.path()).unwrap();
    assert_eq!(files, vec![PathBuf::from("main.py")]);
}

#[test]
fn discover_fails_on_missing_root() {
    let discovery = FileDiscovery::new();
    let result = discovery.discover(Path::new("/nonexistent/path/xyz"));
    assert!(result.is_err());
}

#[test]
fn discover_empty_project_returns_no_files() {
    let temp = TempDir::new().unwrap();
    let discovery = FileDiscovery::new();
    let files = discovery.discover(temp.path()).unwrap();
    assert!(files.is_empty());
}
