use crate::logs::ViewerStats;
use crate::logs::tests::helpers::{at, viewer_record};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn counts_by_level_event_and_status() {
    // Arrange
    let records = vec![
        viewer_record(
            at("2024-01-15", "05:00:00"),
            "ERROR",
            json!({"backup_event": "backup_failed", "status": "error"}),
        ),
        viewer_record(
            at("2024-01-15", "04:00:00"),
            "INFO",
            json!({"backup_event": "backup_completed", "status": "success"}),
        ),
        viewer_record(at("2024-01-15", "03:00:00"), "INFO", json!({})),
    ];

    // Act
    let stats = ViewerStats::from_records(&records);

    // Assert
    assert_eq!(stats.total_entries, 3);
    assert_eq!(
        stats.levels.entries(),
        &[("ERROR".to_string(), 1), ("INFO".to_string(), 2)]
    );
    assert_eq!(stats.events.get("backup_failed"), 1);
    assert_eq!(stats.events.get("unknown"), 1);
    assert_eq!(
        stats.statuses.entries(),
        &[
            ("error".to_string(), 1),
            ("success".to_string(), 1),
            ("unknown".to_string(), 1),
        ]
    );
}

#[test]
fn last_outcomes_are_the_newest_matching_records() {
    // Arrange
    let records = vec![
        viewer_record(at("2024-01-15", "06:00:00"), "INFO", json!({"status": "success"})),
        viewer_record(at("2024-01-15", "05:00:00"), "ERROR", json!({"status": "failed"})),
        viewer_record(at("2024-01-15", "04:00:00"), "INFO", json!({"status": "success"})),
        viewer_record(at("2024-01-15", "03:00:00"), "ERROR", json!({"status": "error"})),
    ];

    // Act
    let stats = ViewerStats::from_records(&records);

    // Assert
    assert_eq!(stats.last_successful, Some(at("2024-01-15", "06:00:00")));
    assert_eq!(stats.last_failed, Some(at("2024-01-15", "05:00:00")));
}

#[test]
fn no_records_no_outcomes() {
    let stats = ViewerStats::from_records(&[]);

    assert_eq!(stats.total_entries, 0);
    assert!(stats.levels.entries().is_empty());
    assert_eq!(stats.last_successful, None);
    assert_eq!(stats.last_failed, None);
}
