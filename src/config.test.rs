use super::*;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn default_config_is_valid() {
    let config = Config::new("/tmp/project");
    assert!(config.validate().is_ok());
    assert_eq!(config.perf.max_workers, 4);
    assert_eq!(config.fuzzy.threshold, 70);
}

#[test]
fn cache_dir_defaults_under_project_root() {
    let config = Config::new("/tmp/project");
    assert_eq!(config.cache_dir(), PathBuf::from("/tmp/project/.repomap/cache"));
}

#[test]
fn load_missing_file_falls_back_to_defaults() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("repomap.toml");
    let config = Config::load(&missing, temp.path());
    assert_eq!(config.project_root, temp.path());
    assert_eq!(config.perf.max_workers, 4);
}

#[test]
fn load_valid_config() {
    let temp = TempDir::new().expect("temp dir");
    let config_path = temp.path().join("repomap.toml");
    let mut file = std::fs::File::create(&config_path).expect("create config");
    writeln!(
        file,
        r#"
project_root = "/tmp/project"

[perf]
max_workers = 8

[fuzzy]
threshold = 80
strategies = ["exact", "prefix"]
"#
    )
    .expect("write config");

    let config = Config::load(&config_path, temp.path());
    assert_eq!(config.perf.max_workers, 8);
    assert_eq!(config.fuzzy.threshold, 80);
    assert!(config.fuzzy.strategies.contains(&FuzzyStrategy::Exact));
}

#[test]
fn validate_rejects_out_of_range_max_workers() {
    let mut config = Config::new("/tmp/project");
    config.perf.max_workers = 32;
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_empty_project_root() {
    let config = Config::new("");
    assert!(config.validate().is_err());
}
