use super::*;

#[test]
fn config_error_displays_message() {
    let err = RepoMapError::ConfigError {
        message: "max_workers out of range".to_string(),
    };
    assert_eq!(err.to_string(), "invalid configuration: max_workers out of range");
}

#[test]
fn io_error_from_std_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: RepoMapError = io_err.into();
    assert!(matches!(err, RepoMapError::IoError { .. }));
}

#[test]
fn diagnostic_carries_path_kind_and_message() {
    let diag = Diagnostic::new("src/main.py", DiagnosticKind::Parse, "unexpected token");
    assert_eq!(diag.path, PathBuf::from("src/main.py"));
    assert_eq!(diag.kind, DiagnosticKind::Parse);
    assert_eq!(diag.message, "unexpected token");
}
