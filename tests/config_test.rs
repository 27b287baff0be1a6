//! Tests for client configuration loading.

use std::io::Write;
use std::time::Duration;

use grid_masters::ClientConfig;
use grid_masters_core::Algorithm;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.server_url(), "http://127.0.0.1:5000");
    assert_eq!(*config.algorithm(), Algorithm::Bfs);
    assert!(*config.sound());
    assert_eq!(config.request_timeout(), None);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
server_url = "http://solver.local:8080"
algorithm = "A*"
"#,
    );
    let config = ClientConfig::from_file(file.path()).unwrap();
    assert_eq!(config.server_url(), "http://solver.local:8080");
    assert_eq!(*config.algorithm(), Algorithm::AStar);
    assert!(*config.sound());
    assert_eq!(config.log_file().to_str(), Some("grid_masters.log"));
}

#[test]
fn test_full_file() {
    let file = write_config(
        r#"
server_url = "http://10.0.0.2:5000"
algorithm = "DFS"
sound = false
log_file = "/tmp/gm.log"
request_timeout_secs = 3
"#,
    );
    let config = ClientConfig::load(Some(file.path())).unwrap();
    assert_eq!(*config.algorithm(), Algorithm::Dfs);
    assert!(!*config.sound());
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(3)));
}

#[test]
fn test_invalid_algorithm_is_rejected() {
    let file = write_config(r#"algorithm = "Dijkstra""#);
    let err = ClientConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ClientConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}

#[test]
fn test_setters_override() {
    let config = ClientConfig::default()
        .with_server_url("http://example.test")
        .with_request_timeout_secs(9)
        .with_sound(false);
    assert_eq!(config.server_url(), "http://example.test");
    assert_eq!(*config.request_timeout_secs(), Some(9));
    assert!(!*config.sound());
}
