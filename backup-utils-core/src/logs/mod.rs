//! Backup Log Processing Pipeline
//!
//! This module reads the backup notification logs that accumulate on disk and
//! turns them into something a person can act on.
//!
//! Every backup lifecycle event (a backup finished, a cleanup failed, a health
//! check found a stale backup) is written as one line:
//!
//! ```text
//! [2024-01-15 03:00:01] local.INFO: Backup completed successfully {"notification_type":"BackupWasSuccessful",...}
//! ```
//!
//! There are two ways to look at those lines:
//! - **Viewer**: picks the most relevant single file, shows the newest entries
//!   as a table, optionally filtered by level or backup event
//! - **Statistics**: reads every daily file in the window plus the generic
//!   file, merges them, and computes success rates, per-type breakdowns, daily
//!   and hourly histograms, a failure trend and memory usage
//!
//! Malformed lines, undecodable payloads and unreadable files are skipped
//! rather than reported.
//!
//! The overall data processing architecture is:
//!
//! LogLocator
//! read_log_file
//! parse_line / parse_notification_line
//! Window
//! merge_sources
//! StatsAggregator
//! AggregatedStats
//! render_report / export_stats
//!

mod classify;
mod export;
mod histogram;
mod locate;
mod merge;
mod parse;
mod pipeline;
mod render;
mod stats_aggregation;
mod types;
mod units;
mod viewer;
mod window;

#[cfg(test)]
mod tests;

pub use classify::{EventOutcome, classify, is_failure};
pub use export::{ExportError, ExportFormat, csv_escape, export_file_name, export_stats, render_csv};
pub use histogram::{Tally, busiest};
pub use locate::{LogLocator, read_log_file};
pub use merge::merge_sources;
pub use parse::{TIMESTAMP_FORMAT, parse_line, parse_notification_line};
pub use pipeline::{load_log_entries, load_notifications, parse_entries, parse_notifications};
pub use render::{
    ReportFormat, render_json, render_log_table, render_report, render_summary, render_table,
    render_viewer_stats,
};
pub use stats_aggregation::{
    ActivityEntry, AggregatedStats, DayBreakdown, FailureAnalysis, FailureEntry, FailureTrend,
    Overview, Performance, StatsAggregator, TimeAnalysis, TypeBreakdown, TypeCount, VersionKeys,
    aggregate, failure_trend,
};
pub use types::{Context, LogRecord, NotificationRecord, ParseOutcome};
pub use units::{format_bytes, relative_time, round2, truncate};
pub use viewer::ViewerStats;
pub use window::{RecordFilter, Window};
