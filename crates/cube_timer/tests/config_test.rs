//! Tests for service configuration loading.

use cube_timer::ServiceConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Temp file");
    file.write_all(content.as_bytes()).expect("Write config");
    file
}

#[test]
fn test_defaults() {
    let config = ServiceConfig::default();
    assert_eq!(config.port(), &3000);
    assert_eq!(config.default_length(), &20);
    assert_eq!(config.length_range(), 1..=100);
    assert_eq!(config.count_range(), 1..=50);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = ServiceConfig::from_file(file.path()).expect("Empty config is valid");
    assert_eq!(config, ServiceConfig::default());
}

#[test]
fn test_partial_file_overrides_fields() {
    let file = write_config(
        r#"
port = 8081
max_length = 40
allowed_origins = ["https://cube.example"]
"#,
    );
    let config = ServiceConfig::from_file(file.path()).expect("Valid config");

    assert_eq!(config.port(), &8081);
    assert_eq!(config.length_range(), 1..=40);
    assert_eq!(config.default_length(), &20);
    assert!(config.allows_origin("https://cube.example"));
    assert!(!config.allows_origin("http://localhost:1234"));
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let err = ServiceConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read"));
}

#[test]
fn test_malformed_toml_is_error() {
    let err = ServiceConfig::from_toml_str("port = [").unwrap_err();
    assert!(err.message.contains("Failed to parse"));
}

#[test]
fn test_inverted_bounds_rejected() {
    let err = ServiceConfig::from_toml_str("min_length = 30\nmax_length = 10").unwrap_err();
    assert!(err.message.contains("exceeds max_length"));
}

#[test]
fn test_default_length_outside_bounds_rejected() {
    let err = ServiceConfig::from_toml_str("default_length = 150").unwrap_err();
    assert!(err.message.contains("default_length"));
}

#[test]
fn test_zero_min_length_rejected() {
    assert!(ServiceConfig::from_toml_str("min_length = 0").is_err());
}

#[test]
fn test_acceptance_out_of_range_rejected() {
    assert!(ServiceConfig::from_toml_str("repeat_axis_acceptance = 1.5").is_err());
    assert!(ServiceConfig::from_toml_str("repeat_axis_acceptance = 0.0").is_ok());
}

#[test]
fn test_port_override() {
    let config = ServiceConfig::default().override_port(Some("9090".to_string()));
    assert_eq!(config.port(), &9090);

    let config = ServiceConfig::default().override_port(Some("not-a-port".to_string()));
    assert_eq!(config.port(), &3000);

    let config = ServiceConfig::default().override_port(None);
    assert_eq!(config.port(), &3000);
}

#[test]
fn test_origin_match_is_exact() {
    let config = ServiceConfig::default();
    assert!(config.allows_origin("http://localhost:8080"));
    assert!(!config.allows_origin("http://localhost:8080/"));
    assert!(!config.allows_origin("http://localhost"));
}

#[test]
fn test_wildcard_origin_rejected() {
    let err = ServiceConfig::from_toml_str(r#"allowed_origins = ["*"]"#).unwrap_err();
    assert!(err.message.contains("not a concrete origin"));
}
