use crate::logs::types::LogRecord;
use chrono::{NaiveDateTime, TimeDelta};

/// Trailing time range ending now.
///
/// `days = 0` puts the cutoff at `now`: only records stamped at or after the
/// current instant survive. A span reaching past the earliest representable
/// date leaves the window without a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    cutoff: NaiveDateTime,
}

impl Window {
    pub fn trailing_days(now: NaiveDateTime, days: u32) -> Self {
        let cutoff = TimeDelta::try_days(i64::from(days))
            .and_then(|span| now.checked_sub_signed(span))
            .unwrap_or(NaiveDateTime::MIN);

        Self { cutoff }
    }

    pub fn cutoff(&self) -> NaiveDateTime {
        self.cutoff
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.cutoff
    }
}

/// Optional viewer filters applied after the window.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    /// Exact level, compared case-insensitively.
    pub level: Option<String>,
    /// Substring of `context.backup_event`.
    pub event: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(level) = &self.level {
            if !record.level.eq_ignore_ascii_case(level) {
                return false;
            }
        }

        if let Some(event) = &self.event {
            match record.backup_event() {
                Some(backup_event) if backup_event.contains(event.as_str()) => {}
                _ => return false,
            }
        }

        true
    }
}
