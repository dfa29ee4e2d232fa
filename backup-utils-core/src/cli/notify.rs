use crate::cli::Outcome;
use crate::conf::BackupUtilsConfig;
use crate::notify::{BackupLogWriter, Notification, NotificationKind};
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDateTime;
use clap::{Args, ValueEnum};
use std::io::Write;

#[derive(Args, Debug, Clone)]
pub struct NotifyArgs {
    /// Notification type, e.g. BackupWasSuccessful or BackupHasFailed
    #[arg(long)]
    pub event: NotificationKind,

    /// Free-form message stored in the payload
    #[arg(long)]
    pub message: Option<String>,

    /// Mail subject shown as failure detail
    #[arg(long)]
    pub subject: Option<String>,

    /// Memory usage in bytes
    #[arg(long)]
    pub memory_usage: Option<u64>,

    /// Extra metadata entry, repeatable
    #[arg(long = "meta", value_name = "KEY=VALUE", value_parser = parse_meta)]
    pub metadata: Vec<(String, String)>,
}

fn parse_meta(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{raw}'"))?;
    if key.is_empty() {
        return Err(anyhow!("metadata key must not be empty"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub fn run_notify(
    args: &NotifyArgs,
    cfg: &BackupUtilsConfig,
    now: NaiveDateTime,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let mut notification = Notification::new(args.event.clone(), now);
    if let Some(message) = &args.message {
        notification = notification.with_message(message);
    }
    if let Some(subject) = &args.subject {
        notification = notification.with_mail_subject(subject);
    }
    if let Some(bytes) = args.memory_usage {
        notification = notification.with_memory_usage(bytes);
    }
    for (key, value) in &args.metadata {
        notification = notification.with_metadata(key, value.as_str());
    }

    let writer = BackupLogWriter::from_config(&cfg.logging);
    let written = writer.write(&notification)?;

    writeln!(
        out,
        "Logged {} to {}",
        notification.kind,
        written
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )?;

    Ok(Outcome::Success)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestKind {
    Success,
    Failed,
}

#[derive(Args, Debug, Clone)]
pub struct TestNotificationArgs {
    /// Kind of synthetic event to log
    #[arg(long = "type", value_enum, default_value = "success")]
    pub kind: TestKind,
}

pub fn run_test_notification(
    args: &TestNotificationArgs,
    cfg: &BackupUtilsConfig,
    now: NaiveDateTime,
    out: &mut dyn Write,
) -> Result<Outcome> {
    writeln!(out, "Testing backup notification system...")?;

    let notification = match args.kind {
        TestKind::Success => {
            writeln!(out, "Creating test successful backup notification...")?;
            Notification::new(NotificationKind::BackupWasSuccessful, now)
                .with_message("Test backup completed successfully")
        }
        TestKind::Failed => {
            writeln!(out, "Creating test failed backup notification...")?;
            Notification::new(NotificationKind::BackupHasFailed, now)
                .with_message("Test backup failure for notification system")
                .with_mail_subject("Test backup failed")
        }
    };

    let writer = BackupLogWriter::from_config(&cfg.logging);
    writer
        .write(&notification)
        .context("test notification could not be written")?;

    writeln!(out, "Test notification logged.\n")?;
    writeln!(out, "Check the following to verify:")?;
    writeln!(out, "- Backup log file: {}", writer.locator().generic_path().display())?;
    writeln!(
        out,
        "- Daily log file: {}",
        writer.locator().dated_path(now.date()).display()
    )?;

    Ok(Outcome::Success)
}
