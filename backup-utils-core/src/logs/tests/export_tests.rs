use crate::logs::tests::helpers::{at, notification, notification_with};
use crate::logs::{
    AggregatedStats, ExportFormat, VersionKeys, aggregate, csv_escape, export_file_name,
    export_stats, render_csv,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

fn sample_stats() -> AggregatedStats {
    let records = vec![
        notification_with(
            at("2024-01-15", "01:00:00"),
            "BackupWasSuccessful",
            json!({"metadata": {"memory_usage": 1024}}),
        ),
        notification(at("2024-01-15", "02:00:00"), "Backup,With,Commas"),
    ];
    aggregate(&records, VersionKeys::default())
}

#[test]
fn file_name_is_timestamped() {
    // Arrange
    let now = at("2024-01-15", "09:05:03");

    // Act / Assert
    assert_eq!(
        export_file_name(ExportFormat::Json, now),
        "backup-stats-2024-01-15-09-05-03.json"
    );
    assert_eq!(
        export_file_name(ExportFormat::Csv, now),
        "backup-stats-2024-01-15-09-05-03.csv"
    );
}

#[test]
fn csv_escape_quotes_only_when_needed() {
    assert_eq!(csv_escape("plain"), "plain");
    assert_eq!(csv_escape("a,b"), "\"a,b\"");
    assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
}

#[test]
fn csv_has_metric_and_type_sections() {
    // Arrange
    let stats = sample_stats();

    // Act
    let csv = render_csv(&stats);

    // Assert
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Metric,Value");
    assert_eq!(lines[1], "Total Events,2");
    assert_eq!(lines[2], "Successful Events,1");
    assert_eq!(lines[3], "Failed Events,0");
    assert_eq!(lines[4], "Success Rate,50%");
    assert!(csv.contains("Average Memory Usage,1.00 KB"));
    assert!(csv.contains("\nNotification Type,Count,Percentage\n"));
    assert!(csv.contains("BackupWasSuccessful,1,50%"));
    assert!(csv.contains("\"Backup,With,Commas\",1,50%"));
}

#[test]
fn export_writes_json_into_created_dir() {
    // Arrange
    let dir = tempdir().unwrap();
    let target = dir.path().join("exports/nested");
    let stats = sample_stats();
    let now = at("2024-01-15", "09:05:03");

    // Act
    let path = export_stats(&stats, ExportFormat::Json, &target, now).unwrap();

    // Assert
    assert_eq!(path, target.join("backup-stats-2024-01-15-09-05-03.json"));
    let restored: AggregatedStats = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(restored, stats);
}

#[test]
fn export_writes_csv() {
    // Arrange
    let dir = tempdir().unwrap();
    let stats = sample_stats();

    // Act
    let path = export_stats(&stats, ExportFormat::Csv, dir.path(), at("2024-01-15", "09:05:03")).unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&path).unwrap(), render_csv(&stats));
}

#[test]
fn export_into_a_file_path_fails() {
    // Arrange
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();

    // Act
    let result = export_stats(&sample_stats(), ExportFormat::Csv, &blocker, at("2024-01-15", "09:05:03"));

    // Assert
    assert!(result.is_err());
}
