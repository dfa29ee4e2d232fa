use crate::logs::merge_sources;
use crate::logs::tests::helpers::{at, notification, notification_with};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn duplicates_across_sources_are_dropped() {
    // Arrange
    let ts = at("2024-01-15", "03:00:00");
    let daily = vec![notification(ts, "BackupWasSuccessful")];
    let generic = vec![
        notification(ts, "BackupWasSuccessful"),
        notification(ts, "CleanupWasSuccessful"),
    ];

    // Act
    let merged = merge_sources([daily, generic]);

    // Assert
    let types: Vec<&str> = merged.iter().map(|r| r.notification_type.as_str()).collect();
    assert_eq!(types, vec!["BackupWasSuccessful", "CleanupWasSuccessful"]);
}

#[test]
fn first_occurrence_wins() {
    // Arrange
    let ts = at("2024-01-15", "03:00:00");
    let first = notification_with(ts, "BackupHasFailed", json!({"mail_subject": "first"}));
    let second = notification_with(ts, "BackupHasFailed", json!({"mail_subject": "second"}));

    // Act
    let merged = merge_sources([vec![first], vec![second]]);

    // Assert
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].data().str_at("mail_subject"), Some("first"));
}

#[test]
fn output_is_sorted_oldest_first() {
    // Arrange
    let newer = notification(at("2024-01-15", "04:00:00"), "BackupWasSuccessful");
    let older = notification(at("2024-01-14", "04:00:00"), "BackupWasSuccessful");
    let middle = notification(at("2024-01-15", "01:00:00"), "BackupHasFailed");

    // Act
    let merged = merge_sources([vec![newer], vec![older, middle]]);

    // Assert
    let stamps: Vec<_> = merged.iter().map(|r| r.timestamp()).collect();
    assert_eq!(
        stamps,
        vec![
            at("2024-01-14", "04:00:00"),
            at("2024-01-15", "01:00:00"),
            at("2024-01-15", "04:00:00"),
        ]
    );
}

#[test]
fn equal_timestamps_keep_source_order() {
    // Arrange
    let ts = at("2024-01-15", "03:00:00");

    // Act
    let merged = merge_sources([
        vec![notification(ts, "CleanupHasFailed")],
        vec![notification(ts, "BackupHasFailed")],
    ]);

    // Assert
    let types: Vec<&str> = merged.iter().map(|r| r.notification_type.as_str()).collect();
    assert_eq!(types, vec!["CleanupHasFailed", "BackupHasFailed"]);
}

#[test]
fn no_sources_yield_nothing() {
    let merged = merge_sources(Vec::<Vec<_>>::new());

    assert!(merged.is_empty());
}
