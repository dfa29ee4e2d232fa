use crate::logs::tests::helpers::at;
use crate::logs::{Context, ParseOutcome, parse_line, parse_notification_line};
use chrono::NaiveDateTime;
use pretty_assertions::assert_eq;

fn epoch() -> NaiveDateTime {
    at("2000-01-01", "00:00:00")
}

//-----------------------------------------------------------------------------
// Loose variant
//-----------------------------------------------------------------------------

#[test]
fn loose_line_with_context() {
    // Arrange
    let line = r#"[2024-01-15 03:00:01] local.INFO: Backup started {"backup_event":"backup_start","status":"running"}"#;

    // Act
    let record = parse_line(line).into_option().unwrap();

    // Assert
    assert_eq!(record.timestamp, at("2024-01-15", "03:00:01"));
    assert_eq!(record.level, "INFO");
    assert_eq!(record.message, "Backup started");
    assert_eq!(record.backup_event(), Some("backup_start"));
    assert_eq!(record.status(), Some("running"));
}

#[test]
fn loose_line_without_context_keeps_whole_body() {
    // Arrange
    let line = "[2024-01-15 03:00:01] production.WARNING: Disk almost full";

    // Act
    let record = parse_line(line).into_option().unwrap();

    // Assert
    assert_eq!(record.level, "WARNING");
    assert_eq!(record.message, "Disk almost full");
    assert_eq!(record.context, Context::default());
}

#[test]
fn loose_line_with_broken_json_has_empty_context() {
    // Arrange
    let line = r#"[2024-01-15 03:00:01] local.ERROR: Broken {"backup_event": "#;

    // Act
    let record = parse_line(line).into_option().unwrap();

    // Assert
    assert_eq!(record.message, "Broken");
    assert_eq!(record.context, Context::default());
}

#[test]
fn lines_outside_the_grammar_are_unmatched() {
    let lines = [
        "",
        "plain text",
        "[2024-01-15] local.INFO: short timestamp",
        "[2024-1-15 03:00:01] local.INFO: unpadded month",
        "[2024-01-15 03:00:01] INFO: no channel",
        "[2024-01-15 03:00:01] local.INFO:",
        "[2024-01-15 03:00:01] local.INFO: ",
        "[2024-13-45 03:00:01] local.INFO: impossible date",
        "2024-01-15 03:00:01 local.INFO: no brackets",
    ];

    for line in lines {
        assert_eq!(parse_line(line), ParseOutcome::Unmatched, "line: {line:?}");
    }
}

//-----------------------------------------------------------------------------
// Strict variant
//-----------------------------------------------------------------------------

#[test]
fn strict_line_yields_notification() {
    // Arrange
    let line = r#"[2024-01-15 03:00:01] local.INFO: Backup completed successfully {"notification_type":"BackupWasSuccessful","notification_class":"backup_utils::BackupWasSuccessful","metadata":{"memory_usage":1048576}}"#;

    // Act
    let record = parse_notification_line(line, epoch()).into_option().unwrap();

    // Assert
    assert_eq!(record.timestamp(), at("2024-01-15", "03:00:01"));
    assert_eq!(record.record.level, "INFO");
    assert_eq!(record.record.message, "Backup completed successfully");
    assert_eq!(record.notification_type, "BackupWasSuccessful");
    assert_eq!(record.notification_class, "backup_utils::BackupWasSuccessful");
    assert_eq!(record.data().f64_at("metadata.memory_usage"), Some(1048576.0));
}

#[test]
fn strict_line_defaults_class_to_unknown() {
    // Arrange
    let line = r#"[2024-01-15 03:00:01] local.ERROR: Backup failed {"notification_type":"BackupHasFailed"}"#;

    // Act
    let record = parse_notification_line(line, epoch()).into_option().unwrap();

    // Assert
    assert_eq!(record.notification_class, "Unknown");
}

#[test]
fn strict_line_ignores_text_after_last_brace() {
    // Arrange
    let line = r#"[2024-01-15 03:00:01] local.INFO: Done {"notification_type":"BackupWasSuccessful"} []"#;

    // Act
    let record = parse_notification_line(line, epoch()).into_option().unwrap();

    // Assert
    assert_eq!(record.notification_type, "BackupWasSuccessful");
}

#[test]
fn strict_line_requires_notification_type() {
    let lines = [
        r#"[2024-01-15 03:00:01] local.INFO: Started {"backup_event":"backup_start"}"#,
        r#"[2024-01-15 03:00:01] local.INFO: Numeric {"notification_type":42}"#,
        r#"[2024-01-15 03:00:01] local.INFO: Array {"notification_type":["a"]}"#,
    ];

    for line in lines {
        assert_eq!(
            parse_notification_line(line, epoch()),
            ParseOutcome::Unmatched,
            "line: {line:?}"
        );
    }
}

#[test]
fn strict_line_rejects_missing_message_or_json() {
    let lines = [
        // no message before the payload
        r#"[2024-01-15 03:00:01] local.INFO: {"notification_type":"BackupWasSuccessful"}"#,
        // no payload
        "[2024-01-15 03:00:01] local.INFO: Backup completed successfully",
        // empty object
        "[2024-01-15 03:00:01] local.INFO: Empty {}",
        // undecodable payload
        r#"[2024-01-15 03:00:01] local.INFO: Broken {"notification_type":}"#,
        // payload is not an object
        "[2024-01-15 03:00:01] local.INFO: Listy {1} [2]",
    ];

    for line in lines {
        assert_eq!(
            parse_notification_line(line, epoch()),
            ParseOutcome::Unmatched,
            "line: {line:?}"
        );
    }
}

#[test]
fn strict_line_older_than_cutoff_is_unmatched() {
    // Arrange
    let line = r#"[2024-01-15 03:00:01] local.INFO: Done {"notification_type":"BackupWasSuccessful"}"#;
    let cutoff = at("2024-01-15", "03:00:02");

    // Act
    let outcome = parse_notification_line(line, cutoff);

    // Assert
    assert_eq!(outcome, ParseOutcome::Unmatched);
}

#[test]
fn strict_line_at_cutoff_is_kept() {
    // Arrange
    let line = r#"[2024-01-15 03:00:01] local.INFO: Done {"notification_type":"BackupWasSuccessful"}"#;
    let cutoff = at("2024-01-15", "03:00:01");

    // Act
    let outcome = parse_notification_line(line, cutoff);

    // Assert
    assert!(matches!(outcome, ParseOutcome::Matched(_)));
}

#[test]
fn message_with_inner_brace_splits_at_first_space_brace() {
    // Arrange
    let line = r#"[2024-01-15 03:00:01] local.INFO: Copied {files} {"notification_type":"BackupWasSuccessful"}"#;

    // Act
    let outcome = parse_notification_line(line, epoch());

    // Assert
    // "{files} {...}" is not a JSON object, so the line is rejected
    assert_eq!(outcome, ParseOutcome::Unmatched);
}
