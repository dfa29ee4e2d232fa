use crate::conf::LoggingConfig;
use crate::logs::{LogLocator, TIMESTAMP_FORMAT};
use crate::notify::notification::{InvalidNotificationKind, Notification, NotificationKind};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append to {path}: {source}")]
    Append {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    InvalidKind(#[from] InvalidNotificationKind),

    #[error("failed to serialize notification payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Appends notification lines to the generic and the daily backup log.
#[derive(Debug, Clone)]
pub struct BackupLogWriter {
    locator: LogLocator,
    channel: String,
}

impl BackupLogWriter {
    pub fn new(locator: LogLocator, channel: impl Into<String>) -> Self {
        Self {
            locator,
            channel: channel.into(),
        }
    }

    pub fn from_config(cfg: &LoggingConfig) -> Self {
        Self::new(LogLocator::from_config(cfg), &cfg.channel)
    }

    pub fn locator(&self) -> &LogLocator {
        &self.locator
    }

    /// `[YYYY-MM-DD HH:MM:SS] <channel>.<LEVEL>: <summary> <json>`
    pub fn format_line(&self, notification: &Notification) -> Result<String, NotifyError> {
        NotificationKind::check_name(notification.kind.as_str())?;
        let payload = serde_json::to_string(&notification.payload())?;

        Ok(format!(
            "[{}] {}.{}: {} {}",
            notification.timestamp.format(TIMESTAMP_FORMAT),
            self.channel,
            notification.kind.level(),
            notification.kind.summary(),
            payload
        ))
    }

    /// Append the event and return the files written, generic file first.
    pub fn write(&self, notification: &Notification) -> Result<Vec<PathBuf>, NotifyError> {
        let line = self.format_line(notification)?;

        let dir = self.locator.dir();
        fs::create_dir_all(dir).map_err(|source| NotifyError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let targets = vec![
            self.locator.generic_path(),
            self.locator.dated_path(notification.timestamp.date()),
        ];
        for path in &targets {
            append_line(path, &line)?;
        }

        tracing::info!(
            notification_type = %notification.kind,
            level = notification.kind.level(),
            "notification logged"
        );
        Ok(targets)
    }
}

fn append_line(path: &Path, line: &str) -> Result<(), NotifyError> {
    let append_err = |source| NotifyError::Append {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(append_err)?;

    writeln!(file, "{line}").map_err(append_err)
}
