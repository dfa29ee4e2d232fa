use crate::logs::locate::{LogLocator, read_log_file};
use crate::logs::merge::merge_sources;
use crate::logs::parse::{parse_line, parse_notification_line};
use crate::logs::types::{LogRecord, NotificationRecord};
use crate::logs::window::{RecordFilter, Window};
use chrono::NaiveDateTime;
use std::path::Path;

/// Records of a single file inside the window and matching `filter`,
/// newest first.
pub fn load_log_entries(path: &Path, window: Window, filter: &RecordFilter) -> Vec<LogRecord> {
    let content = read_log_file(path);
    let mut records = parse_entries(&content, window);

    records.retain(|r| filter.matches(r));
    records.reverse();
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    tracing::debug!(path = %path.display(), records = records.len(), "loaded log entries");
    records
}

/// Viewer records in file order.
pub fn parse_entries(content: &str, window: Window) -> Vec<LogRecord> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_line(line).into_option())
        .filter(|record| window.contains(record.timestamp))
        .collect()
}

/// Statistics-eligible records in file order.
pub fn parse_notifications(content: &str, window: Window) -> Vec<NotificationRecord> {
    let mut skipped = 0_usize;

    let records: Vec<NotificationRecord> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parsed = parse_notification_line(line, window.cutoff()).into_option();
            if parsed.is_none() {
                skipped += 1;
            }
            parsed
        })
        .collect();

    if skipped > 0 {
        tracing::debug!(skipped, "skipped lines outside the statistics grammar or window");
    }

    records
}

/// Gather every statistics record of the last `days` days across the dated
/// files and the generic file, deduplicated and oldest first.
pub fn load_notifications(locator: &LogLocator, now: NaiveDateTime, days: u32) -> Vec<NotificationRecord> {
    let window = Window::trailing_days(now, days);
    let files = locator.stats_files(now.date(), days);

    tracing::debug!(files = files.len(), cutoff = %window.cutoff(), "collecting statistics records");

    merge_sources(
        files
            .iter()
            .map(|path| parse_notifications(&read_log_file(path), window)),
    )
}
