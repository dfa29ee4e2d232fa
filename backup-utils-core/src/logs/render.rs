use crate::logs::stats_aggregation::AggregatedStats;
use crate::logs::types::LogRecord;
use crate::logs::units::{relative_time, truncate};
use crate::logs::viewer::ViewerStats;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use owo_colors::{OwoColorize, Stream};
use std::fmt::Write;

const MESSAGE_WIDTH: usize = 50;

/// Presentation of the statistics report on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Summary,
}

pub fn render_report(
    stats: &AggregatedStats,
    format: ReportFormat,
    now: NaiveDateTime,
) -> serde_json::Result<String> {
    match format {
        ReportFormat::Table => Ok(render_table(stats, now)),
        ReportFormat::Json => render_json(stats),
        ReportFormat::Summary => Ok(render_summary(stats)),
    }
}

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

fn section(out: &mut String, title: &str, body: &Table) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{body}");
    out.push('\n');
}

fn level_color(level: &str) -> Option<Color> {
    match level.to_ascii_lowercase().as_str() {
        "error" | "critical" => Some(Color::Red),
        "warning" => Some(Color::Yellow),
        "info" => Some(Color::Green),
        _ => None,
    }
}

fn level_cell(level: &str) -> Cell {
    let cell = Cell::new(level);
    match level_color(level) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

//-----------------------------------------------------------------------------
// Statistics report
//-----------------------------------------------------------------------------

pub fn render_table(stats: &AggregatedStats, now: NaiveDateTime) -> String {
    let mut out = String::new();
    let overview = &stats.overview;

    let mut t = table(&["Metric", "Value"]);
    t.add_row(vec!["Total Events".to_string(), overview.total_events.to_string()]);
    t.add_row(vec![
        "Successful Events".to_string(),
        overview.successful_events.to_string(),
    ]);
    t.add_row(vec!["Failed Events".to_string(), overview.failed_events.to_string()]);
    t.add_row(vec!["Success Rate".to_string(), format!("{}%", overview.success_rate)]);
    t.add_row(vec!["Failure Rate".to_string(), format!("{}%", overview.failure_rate)]);
    section(&mut out, "Overview", &t);

    let mut t = table(&["Type", "Count", "Percentage", "Last Seen"]);
    for entry in &stats.notification_types {
        t.add_row(vec![
            entry.notification_type.clone(),
            entry.count.to_string(),
            format!("{}%", entry.percentage),
            relative_time(entry.last_occurrence, now),
        ]);
    }
    section(&mut out, "Notification Types", &t);

    let time = &stats.time_analysis;
    let mut t = table(&["Day", "Total", "Successes", "Failures"]);
    for (day, counts) in &time.daily_breakdown {
        t.add_row(vec![
            day.clone(),
            counts.total.to_string(),
            counts.successes.to_string(),
            counts.failures.to_string(),
        ]);
    }
    section(&mut out, "Daily Breakdown", &t);
    let _ = writeln!(
        out,
        "Busiest day: {} | Busiest hour: {}\n",
        time.busiest_day.as_deref().unwrap_or("-"),
        time.busiest_hour
            .as_deref()
            .map_or_else(|| "-".to_string(), |h| format!("{h}:00")),
    );

    let perf = &stats.performance;
    let mut t = table(&["Metric", "Value"]);
    t.add_row(vec!["Average Memory Usage", perf.average_memory_usage.as_str()]);
    t.add_row(vec!["Peak Memory Usage", perf.peak_memory_usage.as_str()]);
    t.add_row(vec!["Runtime Version", perf.runtime_version.as_str()]);
    t.add_row(vec!["Framework Version", perf.framework_version.as_str()]);
    section(&mut out, "Performance", &t);

    let failures = &stats.failure_analysis;
    if failures.total_failures > 0 {
        let mut t = table(&["Metric", "Value"]);
        t.add_row(vec![
            "Total Failures".to_string(),
            failures.total_failures.to_string(),
        ]);
        t.add_row(vec![
            "Failure Trend".to_string(),
            failures.failure_trend.to_string(),
        ]);
        section(&mut out, "Failure Analysis", &t);

        if !failures.recent_failures.is_empty() {
            let mut t = table(&["Type", "When", "Details"]);
            for failure in &failures.recent_failures {
                t.add_row(vec![
                    failure.notification_type.clone(),
                    relative_time(failure.timestamp, now),
                    failure.mail_subject.clone().unwrap_or_else(|| "N/A".to_string()),
                ]);
            }
            section(&mut out, "Recent Failures", &t);
        }
    }

    let mut t = table(&["Type", "Level", "When", "Message"]);
    for activity in &stats.recent_activity {
        t.add_row(vec![
            Cell::new(&activity.notification_type),
            level_cell(&activity.level.to_uppercase()),
            Cell::new(relative_time(activity.timestamp, now)),
            Cell::new(&activity.message),
        ]);
    }
    section(&mut out, "Recent Activity", &t);

    out
}

pub fn render_json(stats: &AggregatedStats) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stats)
}

pub fn render_summary(stats: &AggregatedStats) -> String {
    let mut out = String::new();
    let overview = &stats.overview;

    let _ = writeln!(out, "Backup Statistics Summary\n");
    let _ = writeln!(
        out,
        "{} {}",
        "Total Events:".if_supports_color(Stream::Stdout, |t| t.green()),
        overview.total_events
    );
    let _ = writeln!(
        out,
        "{} {}%",
        "Success Rate:".if_supports_color(Stream::Stdout, |t| t.green()),
        overview.success_rate
    );

    if overview.failed_events > 0 {
        let _ = writeln!(
            out,
            "{} {} ({}%)",
            "Failed Events:".if_supports_color(Stream::Stdout, |t| t.red()),
            overview.failed_events,
            overview.failure_rate
        );
        let _ = writeln!(
            out,
            "{} {}",
            "Failure Trend:".if_supports_color(Stream::Stdout, |t| t.yellow()),
            stats.failure_analysis.failure_trend
        );
    }

    let _ = writeln!(
        out,
        "{} {}",
        "Average Memory:".if_supports_color(Stream::Stdout, |t| t.green()),
        stats.performance.average_memory_usage
    );
    let _ = writeln!(
        out,
        "{} {}",
        "Peak Memory:".if_supports_color(Stream::Stdout, |t| t.green()),
        stats.performance.peak_memory_usage
    );

    let most_common = stats
        .notification_types
        .first()
        .map_or("None", |t| t.notification_type.as_str());
    let _ = writeln!(
        out,
        "{} {}",
        "Most Common:".if_supports_color(Stream::Stdout, |t| t.green()),
        most_common
    );

    out
}

//-----------------------------------------------------------------------------
// Log viewer
//-----------------------------------------------------------------------------

/// Newest-first records, at most `tail` of them.
pub fn render_log_table(records: &[LogRecord], tail: usize) -> String {
    let shown = &records[..records.len().min(tail)];

    if shown.is_empty() {
        return "No backup logs found matching the criteria.\n".to_string();
    }

    let mut out = String::from("Recent Backup Logs:\n\n");

    let mut t = table(&["Time", "Level", "Event", "Status", "Message"]);
    for record in shown {
        t.add_row(vec![
            Cell::new(record.timestamp.format("%m-%d %H:%M:%S")),
            level_cell(&record.level),
            Cell::new(record.backup_event().unwrap_or("unknown")),
            Cell::new(record.status().unwrap_or("unknown")),
            Cell::new(truncate(&record.message, MESSAGE_WIDTH)),
        ]);
    }
    let _ = writeln!(out, "{t}");

    if shown.len() >= tail {
        let _ = writeln!(
            out,
            "\nShowing {tail} most recent entries. Use --tail=N to show more."
        );
    }

    out
}

pub fn render_viewer_stats(stats: &ViewerStats, now: NaiveDateTime) -> String {
    if stats.total_entries == 0 {
        return "No backup logs found for statistics.\n".to_string();
    }

    let mut out = String::from("Backup Log Statistics:\n\n");
    let _ = writeln!(out, "Total entries: {}\n", stats.total_entries);

    let _ = writeln!(out, "By Level:");
    for (level, count) in stats.levels.entries() {
        let _ = writeln!(out, "  {}: {count}", colorize_level(level));
    }

    let _ = writeln!(out, "\nBy Event:");
    for (event, count) in stats.events.entries() {
        let _ = writeln!(out, "  {event}: {count}");
    }

    let _ = writeln!(out, "\nBy Status:");
    for (status, count) in stats.statuses.entries() {
        let label = match status.as_str() {
            "success" => status
                .if_supports_color(Stream::Stdout, |t| t.green())
                .to_string(),
            "error" => status
                .if_supports_color(Stream::Stdout, |t| t.red())
                .to_string(),
            _ => status
                .if_supports_color(Stream::Stdout, |t| t.yellow())
                .to_string(),
        };
        let _ = writeln!(out, "  {label}: {count}");
    }
    out.push('\n');

    if let Some(ts) = stats.last_successful {
        let _ = writeln!(out, "Last successful backup: {}", relative_time(ts, now));
    }
    if let Some(ts) = stats.last_failed {
        let _ = writeln!(
            out,
            "{} {}",
            "Last failed backup:".if_supports_color(Stream::Stdout, |t| t.red()),
            relative_time(ts, now)
        );
    }

    out
}

fn colorize_level(level: &str) -> String {
    match level_color(level) {
        Some(Color::Red) => level
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
        Some(Color::Yellow) => level
            .if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string(),
        Some(Color::Green) => level
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        _ => level.to_string(),
    }
}
