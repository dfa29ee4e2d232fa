use backup_utils_core::cli::Outcome;
use backup_utils_core::cli::logs::{LogsArgs, run_logs};
use backup_utils_core::cli::notify::{
    NotifyArgs, TestNotificationArgs, run_notify, run_test_notification,
};
use backup_utils_core::cli::stats::{StatsArgs, run_stats};
use backup_utils_core::conf::{BackupUtilsConfig, LoggingConfig};
use backup_utils_core::logs::LogLocator;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn at(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").expect("bad fixture timestamp")
}

/// A statistics-eligible line with the payload shape the writer produces.
pub fn notification_line(ts: &str, kind: &str, extra: Value) -> String {
    let level = if kind.contains("Failed") || kind.contains("Unhealthy") {
        "ERROR"
    } else {
        "INFO"
    };

    let mut payload = json!({
        "notification_type": kind,
        "notification_class": format!("backup_utils::{kind}"),
    });
    if let (Some(obj), Value::Object(extra)) = (payload.as_object_mut(), extra) {
        obj.extend(extra);
    }

    format!("[{ts}] local.{level}: Backup Notification: {kind} {payload}")
}

pub fn viewer_line(ts: &str, level: &str, message: &str, context: Value) -> String {
    format!("[{ts}] local.{level}: {message} {context}")
}

/// A throwaway log directory with a matching configuration and a fixed
/// "now".
pub struct LogFixture {
    _root: TempDir,
    pub config: BackupUtilsConfig,
    pub now: NaiveDateTime,
}

impl LogFixture {
    pub fn new(now: &str) -> Self {
        let root = tempfile::tempdir().expect("failed to create tempdir");
        let config = BackupUtilsConfig {
            logging: LoggingConfig {
                dir: root.path().join("storage/logs"),
                ..LoggingConfig::default()
            },
            ..BackupUtilsConfig::default()
        };
        fs::create_dir_all(&config.logging.dir).expect("failed to create log dir");

        Self {
            _root: root,
            config,
            now: at(now),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.config.logging.dir
    }

    pub fn locator(&self) -> LogLocator {
        LogLocator::from_config(&self.config.logging)
    }

    pub fn daily_path(&self, date: &str) -> PathBuf {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("bad fixture date");
        self.locator().dated_path(date)
    }

    pub fn generic_path(&self) -> PathBuf {
        self.locator().generic_path()
    }

    pub fn append_daily(&self, date: &str, lines: &[String]) -> &Self {
        append(&self.daily_path(date), lines);
        self
    }

    pub fn append_generic(&self, lines: &[String]) -> &Self {
        append(&self.generic_path(), lines);
        self
    }

    pub fn logs(&self, args: LogsArgs) -> (Outcome, String) {
        capture(|out| run_logs(&args, &self.config, self.now, out))
    }

    pub fn stats(&self, args: StatsArgs) -> (Outcome, String) {
        capture(|out| run_stats(&args, &self.config, self.now, out))
    }

    pub fn notify(&self, args: NotifyArgs) -> (Outcome, String) {
        capture(|out| run_notify(&args, &self.config, self.now, out))
    }

    pub fn test_notification(&self, args: TestNotificationArgs) -> (Outcome, String) {
        capture(|out| run_test_notification(&args, &self.config, self.now, out))
    }
}

fn append(path: &Path, lines: &[String]) {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .expect("failed to open fixture log");
    for line in lines {
        writeln!(file, "{line}").expect("failed to write fixture log");
    }
}

fn capture<F>(run: F) -> (Outcome, String)
where
    F: FnOnce(&mut dyn Write) -> anyhow::Result<Outcome>,
{
    let mut buf = Vec::new();
    let outcome = run(&mut buf).expect("command failed");
    (outcome, String::from_utf8(buf).expect("output is not UTF-8"))
}
