use crate::logs::is_failure;
use chrono::NaiveDateTime;
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PAYLOAD_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Backup lifecycle events the tool knows how to describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    BackupWasSuccessful,
    BackupHasFailed,
    CleanupWasSuccessful,
    CleanupHasFailed,
    HealthyBackupWasFound,
    UnhealthyBackupWasFound,
    Custom(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::BackupWasSuccessful => "BackupWasSuccessful",
            NotificationKind::BackupHasFailed => "BackupHasFailed",
            NotificationKind::CleanupWasSuccessful => "CleanupWasSuccessful",
            NotificationKind::CleanupHasFailed => "CleanupHasFailed",
            NotificationKind::HealthyBackupWasFound => "HealthyBackupWasFound",
            NotificationKind::UnhealthyBackupWasFound => "UnhealthyBackupWasFound",
            NotificationKind::Custom(name) => name,
        }
    }

    pub fn is_failure(&self) -> bool {
        is_failure(self.as_str())
    }

    /// Log level the event is written at, following the statistics
    /// classification.
    pub fn level(&self) -> &'static str {
        if self.is_failure() { "ERROR" } else { "INFO" }
    }

    /// Type names must be a single header word so the line parses back.
    pub fn check_name(name: &str) -> Result<(), InvalidNotificationKind> {
        if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(())
        } else {
            Err(InvalidNotificationKind(name.to_string()))
        }
    }

    /// Human line written before the JSON payload.
    pub fn summary(&self) -> String {
        match self {
            NotificationKind::BackupWasSuccessful => "Backup completed successfully".to_string(),
            NotificationKind::BackupHasFailed => "Backup failed".to_string(),
            NotificationKind::CleanupWasSuccessful => {
                "Backup cleanup completed successfully".to_string()
            }
            NotificationKind::CleanupHasFailed => "Backup cleanup failed".to_string(),
            NotificationKind::HealthyBackupWasFound => "Healthy backup found".to_string(),
            NotificationKind::UnhealthyBackupWasFound => "Unhealthy backup found".to_string(),
            NotificationKind::Custom(name) => format!("Backup notification: {name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid notification type '{0}': only letters, digits and '_' are allowed")]
pub struct InvalidNotificationKind(pub String);

impl FromStr for NotificationKind {
    type Err = InvalidNotificationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::check_name(s)?;

        Ok(match s {
            "BackupWasSuccessful" => NotificationKind::BackupWasSuccessful,
            "BackupHasFailed" => NotificationKind::BackupHasFailed,
            "CleanupWasSuccessful" => NotificationKind::CleanupWasSuccessful,
            "CleanupHasFailed" => NotificationKind::CleanupHasFailed,
            "HealthyBackupWasFound" => NotificationKind::HealthyBackupWasFound,
            "UnhealthyBackupWasFound" => NotificationKind::UnhealthyBackupWasFound,
            other => NotificationKind::Custom(other.to_string()),
        })
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One event about to be appended to the backup log.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub timestamp: NaiveDateTime,
    pub message: Option<String>,
    pub mail_subject: Option<String>,
    pub memory_usage: Option<u64>,
    /// Extra metadata entries, e.g. runtime and framework versions.
    pub metadata: Map<String, Value>,
}

impl Notification {
    pub fn new(kind: NotificationKind, timestamp: NaiveDateTime) -> Self {
        Self {
            kind,
            timestamp,
            message: None,
            mail_subject: None,
            memory_usage: None,
            metadata: Map::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_mail_subject(mut self, subject: impl Into<String>) -> Self {
        self.mail_subject = Some(subject.into());
        self
    }

    pub fn with_memory_usage(mut self, bytes: u64) -> Self {
        self.memory_usage = Some(bytes);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// JSON object written after the summary.
    pub fn payload(&self) -> Value {
        let kind = self.kind.as_str();
        let timestamp = self.timestamp.format(PAYLOAD_TIMESTAMP_FORMAT).to_string();

        let mut payload = Map::new();
        payload.insert("timestamp".into(), Value::String(timestamp.clone()));
        payload.insert("notification_type".into(), Value::String(kind.to_string()));
        payload.insert(
            "notification_class".into(),
            Value::String(format!("backup_utils::{kind}")),
        );
        if let Some(message) = &self.message {
            payload.insert("message".into(), Value::String(message.clone()));
        }
        if let Some(subject) = &self.mail_subject {
            payload.insert("mail_subject".into(), Value::String(subject.clone()));
        }

        let mut metadata = self.metadata.clone();
        if let Some(bytes) = self.memory_usage {
            metadata.insert("memory_usage".into(), Value::from(bytes));
        }
        payload.insert("metadata".into(), Value::Object(metadata));

        if self.kind.is_failure() {
            payload.insert(
                "failure_context".into(),
                json!({
                    "type": "backup_failure",
                    "notification_type": kind,
                    "timestamp": timestamp,
                }),
            );
        }

        Value::Object(payload)
    }
}
