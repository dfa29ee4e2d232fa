use crate::cli::Outcome;
use crate::conf::BackupUtilsConfig;
use crate::logs::{
    LogLocator, RecordFilter, ViewerStats, Window, load_log_entries, render_log_table,
    render_viewer_stats,
};
use anyhow::Result;
use chrono::NaiveDateTime;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug, Clone, Default)]
pub struct LogsArgs {
    /// Number of days to show logs for
    #[arg(long)]
    pub days: Option<u32>,

    /// Filter by log level (info, warning, error)
    #[arg(long)]
    pub level: Option<String>,

    /// Filter by backup event type
    #[arg(long)]
    pub event: Option<String>,

    /// Show statistics only
    #[arg(long)]
    pub stats: bool,

    /// Number of recent entries to show
    #[arg(long)]
    pub tail: Option<usize>,
}

pub fn run_logs(
    args: &LogsArgs,
    cfg: &BackupUtilsConfig,
    now: NaiveDateTime,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let days = args.days.unwrap_or(cfg.viewer.default_days);
    let tail = args.tail.unwrap_or(cfg.viewer.default_tail);

    let locator = LogLocator::from_config(&cfg.logging);
    let today = now.date();

    let Some(path) = locator.viewer_file(today) else {
        writeln!(out, "No backup log files found. Checked:")?;
        for candidate in locator.viewer_candidates(today) {
            writeln!(out, "- {}", candidate.display())?;
        }
        return Ok(Outcome::NoLogFiles);
    };

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    writeln!(out, "Reading log file: {name}")?;

    let filter = RecordFilter {
        level: args.level.clone(),
        event: args.event.clone(),
    };
    let records = load_log_entries(&path, Window::trailing_days(now, days), &filter);

    if args.stats {
        write!(out, "{}", render_viewer_stats(&ViewerStats::from_records(&records), now))?;
    } else {
        write!(out, "{}", render_log_table(&records, tail))?;
    }

    Ok(Outcome::Success)
}
