use backup_utils_core::cli::config::{check, dump, init};
use backup_utils_core::conf::{BackupUtilsConfig, load_config_with_env};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn init_writes_a_template_that_loads_as_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("config/backup-utils.hcl");
    let mut out = Vec::new();

    // Act
    init(&path, &mut out).unwrap();
    let cfg = load_config_with_env(Some(&path), no_env).unwrap();

    // Assert
    assert_eq!(cfg, BackupUtilsConfig::default());
    assert!(String::from_utf8(out).unwrap().contains("config check"));
}

#[test]
fn init_refuses_to_overwrite() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("backup-utils.hcl");
    fs::write(&path, "# mine").unwrap();

    // Act
    let result = init(&path, &mut Vec::new());

    // Assert
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine");
}

#[test]
fn dump_prints_json_and_yaml() {
    // Arrange
    let cfg = BackupUtilsConfig::default();
    let mut json = Vec::new();
    let mut yaml = Vec::new();

    // Act
    dump(&cfg, false, &mut json).unwrap();
    dump(&cfg, true, &mut yaml).unwrap();

    // Assert
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["logging"]["file_prefix"], "backup");
    assert_eq!(value["stats"]["max_days"], 365);
    let yaml = String::from_utf8(yaml).unwrap();
    assert!(yaml.contains("file_prefix: backup"));
    assert!(yaml.contains("default_tail: 50"));
}

#[test]
fn check_summarizes_the_config() {
    // Arrange
    let cfg = BackupUtilsConfig::default();
    let mut out = Vec::new();

    // Act
    check(&cfg, &mut out).unwrap();

    // Assert
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Config loaded successfully"));
    assert!(out.contains("storage/logs/backup.log"));
    assert!(out.contains("Exports: storage/logs"));
}
